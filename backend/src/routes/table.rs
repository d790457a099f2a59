use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::db::DataRepository;
use crate::models::{BannerCategory, Elapsed, Operator, Region, Timestamp};
use crate::routes::format::{format_date, format_days_since, format_interval, rarity_label};
use crate::services::{average_interval, last_occurrence_wait};

// =========================================================
// Operator table types + route
// =========================================================

/// One row of the operator data grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorTableRow {
    pub id: String,
    pub name: String,
    /// Display rarity, e.g. `"6 (LIMITED)"`.
    pub rarity: String,
    pub limited: bool,
    pub class: String,
    pub gender: String,
    pub faction: String,
    pub subfaction: String,
    pub released: Timestamp,
    pub days_since_featured: Elapsed,
    pub times_featured: usize,
    pub average_featured_interval: Option<i64>,
    pub days_since_shop: Elapsed,
    pub times_shop: usize,
    pub average_shop_interval: Option<i64>,
}

/// Sortable columns of the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableColumn {
    Name,
    Rarity,
    Class,
    Gender,
    Faction,
    Subfaction,
    Released,
    DaysSinceFeatured,
    TimesFeatured,
    AverageFeaturedInterval,
    DaysSinceShop,
    TimesShop,
    AverageShopInterval,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl TableColumn {
    pub const ALL: [TableColumn; 13] = [
        TableColumn::Name,
        TableColumn::Rarity,
        TableColumn::Class,
        TableColumn::Gender,
        TableColumn::Faction,
        TableColumn::Subfaction,
        TableColumn::Released,
        TableColumn::DaysSinceFeatured,
        TableColumn::TimesFeatured,
        TableColumn::AverageFeaturedInterval,
        TableColumn::DaysSinceShop,
        TableColumn::TimesShop,
        TableColumn::AverageShopInterval,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableColumn::Name => "name",
            TableColumn::Rarity => "rarity",
            TableColumn::Class => "class",
            TableColumn::Gender => "gender",
            TableColumn::Faction => "faction",
            TableColumn::Subfaction => "subfaction",
            TableColumn::Released => "released",
            TableColumn::DaysSinceFeatured => "days_since_featured",
            TableColumn::TimesFeatured => "times_featured",
            TableColumn::AverageFeaturedInterval => "average_featured_interval",
            TableColumn::DaysSinceShop => "days_since_shop",
            TableColumn::TimesShop => "times_shop",
            TableColumn::AverageShopInterval => "average_shop_interval",
        }
    }

    /// Text columns searched by the quick filter.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            TableColumn::Name
                | TableColumn::Rarity
                | TableColumn::Class
                | TableColumn::Gender
                | TableColumn::Faction
                | TableColumn::Subfaction
        )
    }

    /// Cell text as the grid shows it.
    pub fn format(&self, row: &OperatorTableRow) -> String {
        match self {
            TableColumn::Name => row.name.clone(),
            TableColumn::Rarity => row.rarity.clone(),
            TableColumn::Class => row.class.clone(),
            TableColumn::Gender => row.gender.clone(),
            TableColumn::Faction => row.faction.clone(),
            TableColumn::Subfaction => row.subfaction.clone(),
            TableColumn::Released => format_date(row.released),
            TableColumn::DaysSinceFeatured => format_days_since(row.days_since_featured),
            TableColumn::TimesFeatured => row.times_featured.to_string(),
            TableColumn::AverageFeaturedInterval => format_interval(row.average_featured_interval),
            TableColumn::DaysSinceShop => format_days_since(row.days_since_shop),
            TableColumn::TimesShop => row.times_shop.to_string(),
            TableColumn::AverageShopInterval => format_interval(row.average_shop_interval),
        }
    }

    fn compare(&self, a: &OperatorTableRow, b: &OperatorTableRow) -> Ordering {
        match self {
            TableColumn::Name => a.name.cmp(&b.name),
            TableColumn::Rarity => a.rarity.cmp(&b.rarity),
            TableColumn::Class => a.class.cmp(&b.class),
            TableColumn::Gender => a.gender.cmp(&b.gender),
            TableColumn::Faction => a.faction.cmp(&b.faction),
            TableColumn::Subfaction => a.subfaction.cmp(&b.subfaction),
            TableColumn::Released => a.released.cmp(&b.released),
            TableColumn::DaysSinceFeatured => a.days_since_featured.cmp(&b.days_since_featured),
            TableColumn::TimesFeatured => a.times_featured.cmp(&b.times_featured),
            TableColumn::AverageFeaturedInterval => {
                compare_interval(a.average_featured_interval, b.average_featured_interval)
            }
            TableColumn::DaysSinceShop => a.days_since_shop.cmp(&b.days_since_shop),
            TableColumn::TimesShop => a.times_shop.cmp(&b.times_shop),
            TableColumn::AverageShopInterval => {
                compare_interval(a.average_shop_interval, b.average_shop_interval)
            }
        }
    }
}

impl FromStr for TableColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        TableColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown table column '{}'", s))
    }
}

/// Undefined intervals sort after every defined one.
fn compare_interval(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Route function name constant for the operator table
pub const GET_OPERATOR_TABLE: &str = "get_operator_table";

/// Table row for `op` as of `now`, `None` if not released in `region`.
pub fn operator_row(op: &Operator, region: Region, now: Timestamp) -> Option<OperatorTableRow> {
    let released = op.released(region)?;
    Some(OperatorTableRow {
        id: op.id.clone(),
        name: op.name.clone(),
        rarity: rarity_label(op.rarity, op.limited),
        limited: op.limited,
        class: op.class.clone(),
        gender: op.gender.clone(),
        faction: op.faction.clone(),
        subfaction: op.subfaction.clone(),
        released,
        days_since_featured: last_occurrence_wait(op, region, BannerCategory::Featured, now),
        times_featured: op.appearances(region, BannerCategory::Featured).len(),
        average_featured_interval: average_interval(op, region, BannerCategory::Featured),
        days_since_shop: last_occurrence_wait(op, region, BannerCategory::Shop, now),
        times_shop: op.appearances(region, BannerCategory::Shop).len(),
        average_shop_interval: average_interval(op, region, BannerCategory::Shop),
    })
}

/// Rows whose text columns contain every whitespace-separated word of
/// `query`, ignoring case. An empty query keeps every row.
pub fn quick_filter<'a>(rows: &'a [OperatorTableRow], query: &str) -> Vec<&'a OperatorTableRow> {
    let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    rows.iter()
        .filter(|row| {
            let haystack = TableColumn::ALL
                .iter()
                .filter(|c| c.is_text())
                .map(|c| c.format(row).to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            words.iter().all(|w| haystack.contains(w.as_str()))
        })
        .collect()
}

/// Stable sort of `rows` by `column`.
pub fn sort_rows(rows: &mut [OperatorTableRow], column: TableColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = column.compare(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Every operator released in `region`, in release order.
pub fn get_operator_table<R>(repo: &R, region: Region, now: Timestamp) -> Vec<OperatorTableRow>
where
    R: DataRepository + ?Sized,
{
    repo.chronological(region)
        .into_iter()
        .filter_map(|op| operator_row(op, region, now))
        .collect()
}
