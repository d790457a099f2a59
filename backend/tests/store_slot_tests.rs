//! The process-wide store slot. Kept in its own test binary, with a single
//! test, because the slot can be filled only once per process.

mod support;

use std::sync::Arc;

use headhunt_analytics::config::AnalyticsConfig;
use headhunt_analytics::db::{self, RepositoryError};
use support::{operator, store};

#[test]
fn test_store_slot_lifecycle() {
    let err = db::get_store().unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidState { .. }));
    assert!(err.to_string().contains("not loaded"));

    let installed = db::install_store(store(vec![operator("a", 6, "Guard", 0)])).unwrap();
    let fetched = db::get_store().unwrap();
    assert!(Arc::ptr_eq(&installed, &fetched));

    let err = db::install_store(store(vec![])).unwrap_err();
    assert!(matches!(err, RepositoryError::ConstructionMisuse { .. }));

    // Already installed: the configured dataset is not re-read.
    let mut config = AnalyticsConfig::default();
    config.dataset.path = "/does/not/exist.json".into();
    let again = db::init_store(&config).unwrap();
    assert!(Arc::ptr_eq(&installed, &again));
    assert_eq!(again.operator_count(), 1);
}
