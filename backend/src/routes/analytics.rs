use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::AnalyticsConfig;
use crate::db::{DataRepository, RepositoryResult};
use crate::models::{Region, ReleaseCategory, Timestamp};
use crate::routes::charts::{
    grouped_bars, histogram, line_series, pie_slices, stacked_bars, GroupedBarRow,
    HistogramBin, LineChartData, PieSlice, StackedBarData,
};
use crate::services;

// =========================================================
// Series types
// =========================================================

/// Category -> count.
pub type AggregateData = BTreeMap<String, usize>;

/// Primary category -> secondary category -> count.
pub type AggregateData2D = BTreeMap<String, AggregateData>;

/// Cumulative counts as of `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub time: Timestamp,
    pub data: AggregateData,
}

/// Whole-day value at `time`, optionally labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericPoint {
    pub time: Timestamp,
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Releases in one period by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCounts {
    pub event: usize,
    pub limited: usize,
    pub standard: usize,
}

impl ReleaseCounts {
    pub fn increment(&mut self, category: ReleaseCategory) {
        match category {
            ReleaseCategory::Event => self.event += 1,
            ReleaseCategory::Limited => self.limited += 1,
            ReleaseCategory::Standard => self.standard += 1,
        }
    }

    pub fn get(&self, category: ReleaseCategory) -> usize {
        match category {
            ReleaseCategory::Event => self.event,
            ReleaseCategory::Limited => self.limited,
            ReleaseCategory::Standard => self.standard,
        }
    }

    pub fn total(&self) -> usize {
        self.event + self.limited + self.standard
    }
}

/// Release counts for one calendar quarter, labelled like `2021'Q3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicAggregatePoint {
    pub period: String,
    pub data: ReleaseCounts,
}

/// How far a regional release trailed CN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDelay {
    pub operator_id: String,
    pub name: String,
    pub released: Timestamp,
    pub days: i64,
}

// =========================================================
// Analytics page payload + route
// =========================================================

/// Every series shown on the analytics page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub region: Region,
    pub checksum: String,

    pub debut_banner_durations: Vec<NumericPoint>,
    pub regular_banner_durations: Vec<NumericPoint>,
    pub shop_debut_delay_6star: Vec<NumericPoint>,
    pub shop_debut_delay_5star: Vec<NumericPoint>,

    pub release_delay: Vec<NumericPoint>,
    pub latest_release_delay: Option<ReleaseDelay>,
    pub quarterly_releases: Vec<GroupedBarRow>,

    pub rarity_pie: Vec<PieSlice>,
    pub class_pie: Vec<PieSlice>,
    pub gender_pie: Vec<PieSlice>,
    pub race_pie: Vec<PieSlice>,
    pub faction_pie: Vec<PieSlice>,

    pub rarity_over_time: LineChartData,
    pub class_over_time: LineChartData,
    pub gender_over_time: LineChartData,

    pub class_rarity: StackedBarData,
    pub rarity_gender: StackedBarData,
    pub class_gender: StackedBarData,

    pub height_histogram: Vec<HistogramBin>,
}

/// Rarity tiers in display order.
pub const RARITY_KEYS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];
/// Gender categories in display order.
pub const GENDER_KEYS: [&str; 3] = ["Female", "Male", "Conviction"];

/// Route function name constant for analytics data
pub const GET_ANALYTICS_DATA: &str = "get_analytics_data";

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// Assemble the analytics page for the configured region.
pub fn get_analytics_data<R>(repo: &R, config: &AnalyticsConfig) -> RepositoryResult<AnalyticsData>
where
    R: DataRepository + ?Sized,
{
    let region = config.analysis.region;
    let slice_limit = config.analysis.pie_slice_limit;

    let rarity_series = services::historical_rarity_data(repo, region)?;
    let class_series = services::historical_class_data(repo, region)?;
    let gender_series = services::historical_gender_data(repo, region)?;

    Ok(AnalyticsData {
        region,
        checksum: repo.checksum().to_string(),

        debut_banner_durations: services::banner_duration_series(repo, region, true),
        regular_banner_durations: services::banner_duration_series(repo, region, false),
        shop_debut_delay_6star: services::shop_debut_delay_series(repo, region, 6),
        shop_debut_delay_5star: services::shop_debut_delay_series(repo, region, 5),

        release_delay: services::release_delay_series(repo, region),
        latest_release_delay: services::latest_release_delay(repo, region),
        quarterly_releases: grouped_bars(&services::periodic_release_aggregate(repo, region)),

        rarity_pie: pie_slices(last_data(&rarity_series), slice_limit),
        class_pie: pie_slices(last_data(&class_series), slice_limit),
        gender_pie: pie_slices(last_data(&gender_series), slice_limit),
        race_pie: pie_slices(&services::race_data(repo), slice_limit),
        faction_pie: pie_slices(&services::faction_data(repo), slice_limit),

        rarity_over_time: line_series(&rarity_series, &owned(&RARITY_KEYS)),
        class_over_time: line_series(&class_series, &[]),
        gender_over_time: line_series(&gender_series, &owned(&GENDER_KEYS)),

        class_rarity: stacked_bars(&services::class_rarity_data(repo), &owned(&RARITY_KEYS)),
        rarity_gender: stacked_bars(&services::rarity_gender_data(repo), &owned(&GENDER_KEYS)),
        class_gender: stacked_bars(&services::class_gender_data(repo), &owned(&GENDER_KEYS)),

        height_histogram: histogram(&services::height_data(repo), config.analysis.histogram_bins),
    })
}

/// Counts of the final point of a historical series.
fn last_data(series: &[AggregatePoint]) -> &AggregateData {
    static EMPTY: AggregateData = AggregateData::new();
    series.last().map_or(&EMPTY, |point| &point.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_counts() {
        let mut counts = ReleaseCounts::default();
        counts.increment(ReleaseCategory::Event);
        counts.increment(ReleaseCategory::Standard);
        counts.increment(ReleaseCategory::Standard);
        assert_eq!(counts.get(ReleaseCategory::Standard), 2);
        assert_eq!(counts.get(ReleaseCategory::Limited), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_numeric_point_omits_missing_label() {
        let point = NumericPoint {
            time: Timestamp::from_millis(5),
            value: 2,
            label: None,
        };
        assert_eq!(
            serde_json::to_string(&point).unwrap(),
            r#"{"time":5,"value":2}"#
        );
    }

    #[test]
    fn test_last_data_of_empty_series() {
        assert!(last_data(&[]).is_empty());
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_ANALYTICS_DATA, "get_analytics_data");
    }
}
