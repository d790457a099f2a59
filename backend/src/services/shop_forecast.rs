//! Certificate-shop debut forecast.
//!
//! Non-limited 6-star operators debut in the rotating certificate shop one at
//! a time, oldest first, at a steady cadence of banners. The forecast takes a
//! window around the most recent debut and extrapolates that cadence linearly
//! in both directions.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::db::{DataRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Operator, Region, Timestamp, BANNER_PERIOD_MS};

/// Rarity of the operators that rotate through shop debuts.
pub const SHOP_DEBUT_RARITY: u8 = 6;

/// Cadence of the linear extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastParams {
    pub banner_period_ms: i64,
    /// Banners between consecutive debuts.
    pub cadence: i64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            banner_period_ms: BANNER_PERIOD_MS,
            cadence: 3,
        }
    }
}

impl ForecastParams {
    /// Milliseconds between consecutive debuts, saturating at the `i64` range.
    pub fn debut_interval_ms(&self) -> i64 {
        self.cadence.saturating_mul(self.banner_period_ms)
    }
}

/// Window of shop-eligible operators with one predicted shop start each.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopForecast<'a> {
    pub operators: Vec<&'a Operator>,
    pub predictions: Vec<Timestamp>,
    /// Position of the most recent debut inside `operators`.
    pub anchor_index: usize,
}

impl<'a> ShopForecast<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&'a Operator, Timestamp)> + '_ {
        self.operators
            .iter()
            .copied()
            .zip(self.predictions.iter().copied())
    }
}

/// Non-limited 6-star operators released in `region`, oldest first.
pub fn shop_eligible_operators<R>(repo: &R, region: Region) -> Vec<&Operator>
where
    R: DataRepository + ?Sized,
{
    repo.chronological(region)
        .into_iter()
        .filter(|op| !op.limited && op.rarity == SHOP_DEBUT_RARITY)
        .collect()
}

/// Index of the most recent debut among the eligible operators.
fn last_debut_index(eligible: &[&Operator], region: Region) -> RepositoryResult<usize> {
    if eligible.len() < 2 {
        return Err(RepositoryError::invalid_state_with_context(
            "Shop-eligible operator count sus",
            ErrorContext::new("shop_forecast")
                .with_entity_id(region)
                .with_details(format!("eligible={}", eligible.len())),
        ));
    }
    eligible
        .iter()
        .rposition(|op| op.release_info(region).is_some_and(|i| i.shop_debut().is_some()))
        .ok_or_else(|| {
            RepositoryError::invalid_state_with_context(
                "No shop-eligible operator has debuted in the certificate shop",
                ErrorContext::new("shop_forecast").with_entity_id(region),
            )
        })
}

/// Largest `(before, after)` window the current data supports.
pub fn forecast_window_limits<R>(repo: &R, region: Region) -> RepositoryResult<(usize, usize)>
where
    R: DataRepository + ?Sized,
{
    let eligible = shop_eligible_operators(repo, region);
    let last = last_debut_index(&eligible, region)?;
    Ok((last, eligible.len() - last - 1))
}

/// The `before` operators up to the most recent shop debut, that debut, and
/// the `after` operators queued behind it, each paired with a predicted shop
/// start.
///
/// Fails with `InvalidState` when fewer than two operators are eligible or
/// none has debuted, and with `OutOfBounds` when the window runs past either
/// end of the eligible list.
pub fn recent_and_upcoming_shop_operators<R>(
    repo: &R,
    region: Region,
    before: usize,
    after: usize,
    params: ForecastParams,
) -> RepositoryResult<ShopForecast<'_>>
where
    R: DataRepository + ?Sized,
{
    let eligible = shop_eligible_operators(repo, region);
    let last = last_debut_index(&eligible, region)?;

    let end = last + 1 + after;
    if before > last || end > eligible.len() {
        return Err(RepositoryError::out_of_bounds_with_context(
            format!(
                "Forecast window ({} before, {} after) exceeds available operators",
                before, after
            ),
            ErrorContext::new("shop_forecast")
                .with_entity_id(region)
                .with_details(format!(
                    "last_debut_index={}, eligible={}",
                    last,
                    eligible.len()
                )),
        ));
    }

    let operators = eligible[last - before..end].to_vec();
    let anchor = operators[before]
        .release_info(region)
        .and_then(|info| info.shop_debut())
        .map(|banner| banner.start)
        .ok_or_else(|| {
            RepositoryError::invalid_state_with_context(
                "Anchor operator lost its shop debut",
                ErrorContext::new("shop_forecast").with_entity_id(&operators[before].id),
            )
        })?;

    let interval = params.debut_interval_ms();
    let predictions = (0..operators.len())
        .map(|idx| {
            (idx as i64 - before as i64)
                .checked_mul(interval)
                .and_then(|offset| anchor.checked_offset_by(offset))
                .ok_or_else(|| {
                    RepositoryError::out_of_bounds_with_context(
                        "Predicted shop start overflows the timestamp range",
                        ErrorContext::new("shop_forecast")
                            .with_entity_id(&operators[idx].id)
                            .with_details(format!("interval_ms={}", interval)),
                    )
                })
        })
        .collect::<RepositoryResult<Vec<_>>>()?;

    debug!(
        "Shop forecast for {}: {} operators anchored on '{}'",
        region,
        operators.len(),
        operators[before].id
    );
    Ok(ShopForecast {
        operators,
        predictions,
        anchor_index: before,
    })
}
