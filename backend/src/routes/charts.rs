//! Chart-shaped views of the aggregate series.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::api::{AggregateData, AggregateData2D, AggregatePoint, PeriodicAggregatePoint};
use crate::models::Timestamp;

/// Label of the slice that collects everything past the slice limit.
pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

/// One row of a multi-series line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRow {
    pub time: Timestamp,
    pub values: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChartData {
    /// Series plotted, one per key.
    pub keys: Vec<String>,
    pub rows: Vec<LineRow>,
    /// A single series needs no legend.
    pub show_legend: bool,
}

/// One bar of a stacked bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRow {
    pub key: String,
    pub values: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedBarData {
    pub keys: Vec<String>,
    pub rows: Vec<BarRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedBarRow {
    pub period: String,
    pub event: usize,
    pub limited: usize,
    pub standard: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Largest categories first; past `slice_limit` the rest fold into one
/// `"Other"` slice. Equal counts keep key order.
pub fn pie_slices(data: &AggregateData, slice_limit: usize) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = data
        .iter()
        .map(|(label, &value)| PieSlice {
            label: label.clone(),
            value,
        })
        .collect();
    slices.sort_by(|a, b| b.value.cmp(&a.value));

    if slices.len() > slice_limit {
        let other: usize = slices[slice_limit..].iter().map(|s| s.value).sum();
        slices.truncate(slice_limit);
        slices.push(PieSlice {
            label: OTHER_LABEL.to_string(),
            value: other,
        });
    }
    slices
}

/// Flatten a historical series into rows keyed by `keys`, or by the keys of
/// the last point when `keys` is empty. Keys absent from a point read as 0.
pub fn line_series(points: &[AggregatePoint], keys: &[String]) -> LineChartData {
    let keys: Vec<String> = if keys.is_empty() {
        points
            .last()
            .map(|p| p.data.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        keys.to_vec()
    };

    let rows = points
        .iter()
        .map(|point| LineRow {
            time: point.time,
            values: keys
                .iter()
                .map(|k| (k.clone(), point.data.get(k).copied().unwrap_or(0)))
                .collect(),
        })
        .collect();

    LineChartData {
        show_legend: keys.len() != 1,
        keys,
        rows,
    }
}

/// Flatten a 2D aggregate into one bar per primary key with every secondary
/// key present, zero-filled. With no explicit `keys` the union of observed
/// secondary keys is used.
pub fn stacked_bars(data: &AggregateData2D, keys: &[String]) -> StackedBarData {
    let keys: Vec<String> = if keys.is_empty() {
        data.values()
            .flat_map(|row| row.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        keys.to_vec()
    };

    let rows = data
        .iter()
        .map(|(key, counts)| {
            let mut values = counts.clone();
            for k in &keys {
                values.entry(k.clone()).or_insert(0);
            }
            BarRow {
                key: key.clone(),
                values,
            }
        })
        .collect();

    StackedBarData { keys, rows }
}

pub fn grouped_bars(points: &[PeriodicAggregatePoint]) -> Vec<GroupedBarRow> {
    points
        .iter()
        .map(|p| GroupedBarRow {
            period: p.period.clone(),
            event: p.data.event,
            limited: p.data.limited,
            standard: p.data.standard,
        })
        .collect()
}

/// Equal-width bins spanning the observed range. The last bin is closed.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}
