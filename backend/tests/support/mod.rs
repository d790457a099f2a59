#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use headhunt_analytics::db::RecordStore;
use headhunt_analytics::models::{BannerInfo, Operator, Region, ReleaseInfo, Timestamp, DAY_MS};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Path of the bundled sample dataset.
pub fn sample_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_dataset.json")
}

/// Path of the bundled image map.
pub fn sample_images_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/images.json")
}

pub fn sample_store() -> RecordStore {
    RecordStore::from_path(sample_dataset_path()).expect("sample dataset should load")
}

/// Headhunting-eligible, non-limited operator released at `released_ms` in
/// both regions.
pub fn operator(id: &str, rarity: u8, class: &str, released_ms: i64) -> Operator {
    Operator {
        id: id.to_string(),
        name: id.to_string(),
        class: class.to_string(),
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

pub fn banner(start_ms: i64, end_ms: i64) -> BannerInfo {
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

pub fn banner_on_day(day: i64) -> BannerInfo {
    banner(day * DAY_MS, (day + 14) * DAY_MS)
}

pub fn store(operators: Vec<Operator>) -> RecordStore {
    RecordStore::from_records(operators, BTreeMap::new()).expect("fixture store")
}

pub fn store_with_banners(
    operators: Vec<Operator>,
    region: Region,
    banners: Vec<BannerInfo>,
) -> RecordStore {
    let mut map = BTreeMap::new();
    map.insert(region, banners);
    RecordStore::from_records(operators, map).expect("fixture store")
}
