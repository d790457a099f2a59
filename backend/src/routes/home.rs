use log::warn;
use serde::{Deserialize, Serialize};

use crate::api::ReleaseDelay;
use crate::config::AnalyticsConfig;
use crate::db::{DataRepository, ImageContext, ImageIndex, RepositoryResult};
use crate::models::{BannerCategory, Elapsed, Region, Timestamp};
use crate::routes::format::{format_average, format_days_since};
use crate::routes::shop::{get_shop_forecast, ShopForecastData};
use crate::services::{self, OverdueEntry};

// =========================================================
// Home page types + route
// =========================================================

/// Rarities that get an overdue table on the home page.
pub const OVERDUE_RARITIES: [u8; 2] = [6, 5];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestOperator {
    pub id: String,
    pub name: String,
    pub rarity: u8,
    pub released: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueRow {
    pub operator_id: String,
    pub name: String,
    pub wait: Elapsed,
    /// `"Now"`, `"Never"` or `"{n}d"`.
    pub display: String,
    /// Waiting longer than the table's category average.
    pub exceeds_average: bool,
}

impl From<&OverdueEntry<'_>> for OverdueRow {
    fn from(entry: &OverdueEntry<'_>) -> Self {
        Self {
            operator_id: entry.operator.id.clone(),
            name: entry.operator.name.clone(),
            wait: entry.wait,
            display: format_days_since(entry.wait),
            exceeds_average: entry.exceeds_average,
        }
    }
}

/// Overdue ranking for one rarity and banner category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueTable {
    pub rarity: u8,
    pub category: BannerCategory,
    pub rows: Vec<OverdueRow>,
    /// Mean days between appearances for this rarity and category.
    pub category_average: Option<f64>,
    pub category_average_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeData {
    pub region: Region,
    pub operator_count: usize,
    pub banner_count: usize,
    pub latest_operators: Vec<LatestOperator>,
    pub latest_release_delay: Option<ReleaseDelay>,
    pub overdue: Vec<OverdueTable>,
    /// Absent when the data cannot support a forecast.
    pub shop_forecast: Option<ShopForecastData>,
}

impl HomeData {
    /// Fill portraits of the latest operators and the shop cards from `images`.
    pub fn attach_portraits(&mut self, images: &ImageIndex) {
        for op in &mut self.latest_operators {
            op.portrait = images
                .try_resolve(ImageContext::Portraits, &op.name)
                .map(str::to_string);
        }
        if let Some(forecast) = &mut self.shop_forecast {
            forecast.attach_portraits(images);
        }
    }
}

/// Route function name constant for home data
pub const GET_HOME_DATA: &str = "get_home_data";

pub fn overdue_table<R>(
    repo: &R,
    region: Region,
    rarity: u8,
    category: BannerCategory,
    now: Timestamp,
) -> OverdueTable
where
    R: DataRepository + ?Sized,
{
    let rows = services::overdue_set(repo, region, rarity, category, now)
        .iter()
        .map(OverdueRow::from)
        .collect();
    let category_average = services::category_average(repo, region, rarity, category);
    OverdueTable {
        rarity,
        category,
        rows,
        category_average,
        category_average_display: format_average(category_average),
    }
}

/// Assemble the home page as of `now`.
pub fn get_home_data<R>(
    repo: &R,
    config: &AnalyticsConfig,
    now: Timestamp,
) -> RepositoryResult<HomeData>
where
    R: DataRepository + ?Sized,
{
    let region = config.analysis.region;

    let latest_operators = repo
        .latest_operators(region)
        .into_iter()
        .filter_map(|op| {
            Some(LatestOperator {
                id: op.id.clone(),
                name: op.name.clone(),
                rarity: op.rarity,
                released: op.released(region)?,
                portrait: None,
            })
        })
        .collect();

    let mut overdue = Vec::new();
    for rarity in OVERDUE_RARITIES {
        for category in BannerCategory::ALL {
            overdue.push(overdue_table(repo, region, rarity, category, now));
        }
    }

    let shop_forecast = match get_shop_forecast(repo, config, now) {
        Ok(forecast) => Some(forecast),
        Err(e) => {
            warn!("Shop forecast unavailable: {}", e);
            None
        }
    };

    Ok(HomeData {
        region,
        operator_count: repo.operators().len(),
        banner_count: repo.banner_count(region),
        latest_operators,
        latest_release_delay: services::latest_release_delay(repo, region),
        overdue,
        shop_forecast,
    })
}
