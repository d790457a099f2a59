//! Public API surface of the analytics backend.
//!
//! This file consolidates the DTO types a presentation layer consumes.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::analytics::AggregateData;
pub use crate::routes::analytics::AggregateData2D;
pub use crate::routes::analytics::AggregatePoint;
pub use crate::routes::analytics::AnalyticsData;
pub use crate::routes::analytics::NumericPoint;
pub use crate::routes::analytics::PeriodicAggregatePoint;
pub use crate::routes::analytics::ReleaseCounts;
pub use crate::routes::analytics::ReleaseDelay;
pub use crate::routes::charts::BarRow;
pub use crate::routes::charts::GroupedBarRow;
pub use crate::routes::charts::HistogramBin;
pub use crate::routes::charts::LineChartData;
pub use crate::routes::charts::LineRow;
pub use crate::routes::charts::PieSlice;
pub use crate::routes::charts::StackedBarData;
pub use crate::routes::home::HomeData;
pub use crate::routes::home::LatestOperator;
pub use crate::routes::home::OverdueRow;
pub use crate::routes::home::OverdueTable;
pub use crate::routes::shop::ShopCard;
pub use crate::routes::shop::ShopForecastData;
pub use crate::routes::shop::ShopStatus;
pub use crate::routes::table::OperatorTableRow;
pub use crate::routes::table::SortDirection;
pub use crate::routes::table::TableColumn;

pub use crate::models::{
    BannerCategory, BannerInfo, Birthday, Elapsed, Operator, Region, ReleaseCategory,
    ReleaseInfo, Timestamp,
};
