use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::db::{DataRepository, ImageContext, ImageIndex, RepositoryResult};
use crate::models::{days_since, Operator, Region, Timestamp};
use crate::services::{self, ShopForecast};

// =========================================================
// Shop card types + route
// =========================================================

/// Where an operator stands relative to its certificate-shop debut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShopStatus {
    /// Not yet in the shop; predicted to debut in `in_days`.
    Expected { in_days: i64 },
    /// The first shop banner is running now.
    CurrentlyActive,
    /// First shop banner started `days_ago` days ago.
    Debuted { days_ago: i64 },
}

impl std::fmt::Display for ShopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopStatus::Expected { in_days } => write!(f, "Expected in {}d", in_days),
            ShopStatus::CurrentlyActive => f.write_str("Currently Active"),
            ShopStatus::Debuted { days_ago } => write!(f, "Debuted {}d ago", days_ago),
        }
    }
}

/// One card of the certificate-shop carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopCard {
    pub operator_id: String,
    pub name: String,
    pub days_since_release: i64,
    pub predicted: Timestamp,
    pub status: ShopStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

/// Certificate-shop carousel with the most recent debut in the middle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopForecastData {
    pub region: Region,
    pub cards: Vec<ShopCard>,
    pub anchor_index: usize,
}

impl ShopForecastData {
    /// Fill each card's portrait from `images`, keyed by operator name.
    pub fn attach_portraits(&mut self, images: &ImageIndex) {
        for card in &mut self.cards {
            card.portrait = images
                .try_resolve(ImageContext::Portraits, &card.name)
                .map(str::to_string);
        }
    }
}

/// Route function name constant for the shop forecast
pub const GET_SHOP_FORECAST: &str = "get_shop_forecast";

/// Status of `op` at `now` given its predicted debut.
pub fn shop_status(
    op: &Operator,
    region: Region,
    prediction: Timestamp,
    now: Timestamp,
) -> ShopStatus {
    match op.release_info(region).and_then(|info| info.shop_debut()) {
        None => ShopStatus::Expected {
            in_days: -days_since(prediction, now),
        },
        Some(debut) if debut.is_active_at(now) => ShopStatus::CurrentlyActive,
        Some(debut) => ShopStatus::Debuted {
            days_ago: days_since(debut.start, now),
        },
    }
}

pub fn shop_cards(forecast: &ShopForecast<'_>, region: Region, now: Timestamp) -> Vec<ShopCard> {
    forecast
        .iter()
        .map(|(op, predicted)| ShopCard {
            operator_id: op.id.clone(),
            name: op.name.clone(),
            days_since_release: op
                .released(region)
                .map_or(0, |released| days_since(released, now)),
            predicted,
            status: shop_status(op, region, predicted, now),
            portrait: None,
        })
        .collect()
}

/// Forecast window from the configuration, shrunk to what the data holds.
pub fn get_shop_forecast<R>(
    repo: &R,
    config: &AnalyticsConfig,
    now: Timestamp,
) -> RepositoryResult<ShopForecastData>
where
    R: DataRepository + ?Sized,
{
    let region = config.analysis.region;
    let (max_before, max_after) = services::forecast_window_limits(repo, region)?;
    let before = config.analysis.forecast_before.min(max_before);
    let after = config.analysis.forecast_after.min(max_after);

    let forecast = services::recent_and_upcoming_shop_operators(
        repo,
        region,
        before,
        after,
        config.forecast_params(),
    )?;
    Ok(ShopForecastData {
        region,
        cards: shop_cards(&forecast, region, now),
        anchor_index: forecast.anchor_index,
    })
}
