//! The bundled sample dataset loads and every page renders from it.

mod support;

use headhunt_analytics::config::AnalyticsConfig;
use headhunt_analytics::db::{DataRepository, ImageContext, ImageIndex};
use headhunt_analytics::models::{Region, Timestamp};
use headhunt_analytics::routes::{analytics, home, shop, table};
use support::{sample_images_path, sample_store};

// 2021-09-01T00:00:00Z
const NOW: Timestamp = Timestamp::from_millis(1_630_454_400_000);

#[test]
fn test_sample_dataset_loads() {
    let store = sample_store();
    assert!(store.operator_count() > 20);
    assert!(store.banner_count(Region::En) > 10);
    assert!(store.chronological(Region::Cn).len() > store.chronological(Region::En).len());
}

#[test]
fn test_sample_home_page() {
    let store = sample_store();
    let data = home::get_home_data(&store, &AnalyticsConfig::default(), NOW).unwrap();
    assert_eq!(data.operator_count, store.operator_count());
    assert!(!data.latest_operators.is_empty());
    assert!(data.shop_forecast.is_some());
    assert_eq!(data.overdue.len(), 4);
    serde_json::to_string(&data).unwrap();
}

#[test]
fn test_sample_analytics_page() {
    let store = sample_store();
    let data = analytics::get_analytics_data(&store, &AnalyticsConfig::default()).unwrap();
    assert!(!data.debut_banner_durations.is_empty());
    assert!(!data.quarterly_releases.is_empty());
    assert_eq!(data.rarity_over_time.keys.len(), 6);
    assert_eq!(
        data.rarity_pie.iter().map(|s| s.value).sum::<usize>(),
        store.chronological(Region::En).len()
    );
    assert!(!data.height_histogram.is_empty());
}

#[test]
fn test_sample_shop_forecast() {
    let store = sample_store();
    let data = shop::get_shop_forecast(&store, &AnalyticsConfig::default(), NOW).unwrap();
    assert!(data.cards.len() > data.anchor_index);
    for pair in data.cards.windows(2) {
        assert!(pair[0].predicted < pair[1].predicted);
    }
}

#[test]
fn test_sample_table_resolves_portraits() {
    let store = sample_store();
    let images = ImageIndex::from_path(sample_images_path()).unwrap();
    let rows = table::get_operator_table(&store, Region::En, NOW);
    assert!(!rows.is_empty());
    for row in &rows {
        assert!(images.try_resolve(ImageContext::Portraits, &row.name).is_some());
        assert!(images.try_resolve(ImageContext::Classes, &row.class).is_some());
    }
}

#[test]
fn test_sample_home_page_with_portraits() {
    let store = sample_store();
    let images = ImageIndex::from_path(sample_images_path()).unwrap();
    let mut data = home::get_home_data(&store, &AnalyticsConfig::default(), NOW).unwrap();
    data.attach_portraits(&images);

    assert!(data.latest_operators.iter().all(|op| op.portrait.is_some()));
    let forecast = data.shop_forecast.expect("sample data supports a forecast");
    assert!(forecast.cards.iter().all(|card| card.portrait.is_some()));
}
