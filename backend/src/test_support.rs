//! Builders shared by the unit tests.

use std::collections::BTreeMap;

use crate::db::RecordStore;
use crate::models::{BannerInfo, Operator, Region, ReleaseInfo, Timestamp, DAY_MS};

/// A non-limited, headhunting-eligible operator released at `released_ms`
/// in both regions.
pub(crate) fn operator(id: &str, rarity: u8, released_ms: i64) -> Operator {
    Operator {
        id: id.to_string(),
        name: id.to_string(),
        class: "Guard".to_string(),
        rarity,
        gender: "Female".to_string(),
        race: "Feline".to_string(),
        height: Some(160.0),
        faction: "Rhodes Island".to_string(),
        subfaction: String::new(),
        birthday: None,
        limited: false,
        headhunting: true,
        recruitment: false,
        event: false,
        en: Some(ReleaseInfo::new(Timestamp::from_millis(released_ms))),
        cn: Some(ReleaseInfo::new(Timestamp::from_millis(released_ms))),
    }
}

/// A plain banner running from `start_ms` to `end_ms`.
pub(crate) fn banner(start_ms: i64, end_ms: i64) -> BannerInfo {
    BannerInfo {
        start: Timestamp::from_millis(start_ms),
        end: Timestamp::from_millis(end_ms),
        title: format!("Banner {}", start_ms),
        featured: vec![],
        shop: vec![],
        is_limited: false,
        shop_debut_6star: vec![],
        shop_debut_5star: vec![],
        is_event: false,
        is_rotating: true,
    }
}

/// A 14-day banner starting on `day`.
pub(crate) fn banner_on_day(day: i64) -> BannerInfo {
    banner(day * DAY_MS, (day + 14) * DAY_MS)
}

pub(crate) fn store(operators: Vec<Operator>) -> RecordStore {
    RecordStore::from_records(operators, BTreeMap::new()).expect("fixture store")
}

pub(crate) fn store_with_banners(
    operators: Vec<Operator>,
    region: Region,
    banners: Vec<BannerInfo>,
) -> RecordStore {
    let mut map = BTreeMap::new();
    map.insert(region, banners);
    RecordStore::from_records(operators, map).expect("fixture store")
}
