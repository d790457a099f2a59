//! Aggregation engine: folds the operator collection into cumulative,
//! snapshot, cross-tabulated and per-quarter series.

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::api::{
    AggregateData, AggregateData2D, AggregatePoint, PeriodicAggregatePoint, ReleaseCounts,
};
use crate::db::{DataRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Operator, Region, Timestamp};

/// Key functions for the named aggregates.
pub mod keys {
    use crate::models::Operator;

    pub fn class(op: &Operator) -> String {
        op.class.clone()
    }

    pub fn rarity(op: &Operator) -> String {
        op.rarity.to_string()
    }

    pub fn gender(op: &Operator) -> String {
        op.gender.clone()
    }

    pub fn race(op: &Operator) -> String {
        op.race.clone()
    }

    pub fn faction(op: &Operator) -> String {
        op.faction.clone()
    }
}

/// Cumulative category counts, one point per distinct release timestamp in
/// `region`. Each point holds the totals as of that timestamp, including the
/// operators released at it.
pub fn historical_aggregate<R, F>(
    repo: &R,
    region: Region,
    key_fn: F,
) -> RepositoryResult<Vec<AggregatePoint>>
where
    R: DataRepository + ?Sized,
    F: Fn(&Operator) -> String,
{
    let operators = repo.chronological(region);
    if operators.is_empty() {
        return Err(RepositoryError::invalid_state_with_context(
            "No operators released to aggregate",
            ErrorContext::new("historical_aggregate").with_entity_id(region),
        ));
    }

    let mut series = Vec::new();
    let mut tally = AggregateData::new();
    let mut current: Option<Timestamp> = None;

    for op in operators {
        let Some(released) = op.released(region) else {
            continue;
        };
        if current != Some(released) {
            if let Some(time) = current {
                series.push(AggregatePoint {
                    time,
                    data: tally.clone(),
                });
            }
            current = Some(released);
        }
        *tally.entry(key_fn(op)).or_insert(0) += 1;
    }
    if let Some(time) = current {
        series.push(AggregatePoint { time, data: tally });
    }

    debug!(
        "Historical aggregate for {}: {} points",
        region,
        series.len()
    );
    Ok(series)
}

/// Category counts over every operator on record.
pub fn snapshot_aggregate<R, F>(repo: &R, key_fn: F) -> AggregateData
where
    R: DataRepository + ?Sized,
    F: Fn(&Operator) -> String,
{
    let mut data = AggregateData::new();
    for op in repo.operators().values() {
        *data.entry(key_fn(op)).or_insert(0) += 1;
    }
    data
}

/// Nested primary -> secondary -> count. Absent secondary keys are left out.
pub fn snapshot_aggregate_2d<R, F, G>(repo: &R, primary: F, secondary: G) -> AggregateData2D
where
    R: DataRepository + ?Sized,
    F: Fn(&Operator) -> String,
    G: Fn(&Operator) -> String,
{
    let mut data = AggregateData2D::new();
    for op in repo.operators().values() {
        *data
            .entry(primary(op))
            .or_default()
            .entry(secondary(op))
            .or_insert(0) += 1;
    }
    data
}

/// Releases per calendar quarter split into event, limited and standard.
///
/// The launch batch (every operator sharing the earliest release timestamp)
/// is not counted. Quarters between the first and last counted release are
/// all present, empty ones with zero counts.
pub fn periodic_release_aggregate<R>(repo: &R, region: Region) -> Vec<PeriodicAggregatePoint>
where
    R: DataRepository + ?Sized,
{
    let operators = repo.chronological(region);
    let Some(launch) = operators.first().and_then(|op| op.released(region)) else {
        return Vec::new();
    };

    let mut quarters: BTreeMap<(i32, u32), ReleaseCounts> = BTreeMap::new();
    let mut dropped = 0usize;
    for op in operators {
        let Some(released) = op.released(region) else {
            continue;
        };
        if released == launch {
            continue;
        }
        let counts = quarters.entry(quarter_key(released)).or_default();
        match op.release_category() {
            Some(category) => counts.increment(category),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(
            "{} {} operators are neither event, limited nor headhunting; left out of release counts",
            dropped, region
        );
    }

    let (Some(&first), Some(&last)) = (quarters.keys().next(), quarters.keys().next_back()) else {
        return Vec::new();
    };
    let mut points = Vec::new();
    let mut key = first;
    while key <= last {
        points.push(PeriodicAggregatePoint {
            period: format!("{}'Q{}", key.0, key.1),
            data: quarters.get(&key).copied().unwrap_or_default(),
        });
        key = next_quarter(key);
    }
    points
}

fn quarter_key(ts: Timestamp) -> (i32, u32) {
    use chrono::Datelike;
    let dt = ts.to_datetime();
    (dt.year(), crate::models::quarter_of(dt.month()))
}

fn next_quarter((year, quarter): (i32, u32)) -> (i32, u32) {
    if quarter >= 4 {
        (year + 1, 1)
    } else {
        (year, quarter + 1)
    }
}

// =========================================================
// Named aggregates
// =========================================================

pub fn historical_gender_data<R: DataRepository + ?Sized>(
    repo: &R,
    region: Region,
) -> RepositoryResult<Vec<AggregatePoint>> {
    historical_aggregate(repo, region, keys::gender)
}

pub fn historical_race_data<R: DataRepository + ?Sized>(
    repo: &R,
    region: Region,
) -> RepositoryResult<Vec<AggregatePoint>> {
    historical_aggregate(repo, region, keys::race)
}

pub fn historical_faction_data<R: DataRepository + ?Sized>(
    repo: &R,
    region: Region,
) -> RepositoryResult<Vec<AggregatePoint>> {
    historical_aggregate(repo, region, keys::faction)
}

pub fn historical_rarity_data<R: DataRepository + ?Sized>(
    repo: &R,
    region: Region,
) -> RepositoryResult<Vec<AggregatePoint>> {
    historical_aggregate(repo, region, keys::rarity)
}

pub fn historical_class_data<R: DataRepository + ?Sized>(
    repo: &R,
    region: Region,
) -> RepositoryResult<Vec<AggregatePoint>> {
    historical_aggregate(repo, region, keys::class)
}

pub fn race_data<R: DataRepository + ?Sized>(repo: &R) -> AggregateData {
    snapshot_aggregate(repo, keys::race)
}

pub fn faction_data<R: DataRepository + ?Sized>(repo: &R) -> AggregateData {
    snapshot_aggregate(repo, keys::faction)
}

/// Heights of every operator with a recorded height.
pub fn height_data<R: DataRepository + ?Sized>(repo: &R) -> Vec<f64> {
    repo.operators()
        .values()
        .filter_map(|op| op.height)
        .filter(|h| h.is_finite())
        .collect()
}

pub fn class_rarity_data<R: DataRepository + ?Sized>(repo: &R) -> AggregateData2D {
    snapshot_aggregate_2d(repo, keys::class, keys::rarity)
}

pub fn rarity_gender_data<R: DataRepository + ?Sized>(repo: &R) -> AggregateData2D {
    snapshot_aggregate_2d(repo, keys::rarity, keys::gender)
}

pub fn class_gender_data<R: DataRepository + ?Sized>(repo: &R) -> AggregateData2D {
    snapshot_aggregate_2d(repo, keys::class, keys::gender)
}
