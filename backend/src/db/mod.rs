//! Record store for the headhunting dataset.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Presentation (routes: chart/table adapters, payloads)  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Services - aggregation, forecast, overdue queries      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  DataRepository trait (repository.rs)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │  RecordStore (in-memory, immutable)          │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! A [`RecordStore`] can be constructed and passed around explicitly. For
//! applications that want exactly one shared instance, [`install_store`] /
//! [`get_store`] hold it in a process-wide slot that can be filled once.

pub mod checksum;
pub mod error;
pub mod images;
pub mod repository;
pub mod store;


pub use checksum::calculate_checksum;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use images::{ImageContext, ImageIndex};
pub use repository::DataRepository;
pub use store::{Dataset, RecordStore};

use log::info;
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::config::AnalyticsConfig;

/// Global record store, filled at most once per process.
static STORE: OnceCell<Arc<RecordStore>> = OnceCell::new();

/// Install `store` as the process-wide instance.
///
/// Fails with `ConstructionMisuse` if a store is already installed.
pub fn install_store(store: RecordStore) -> RepositoryResult<Arc<RecordStore>> {
    let store = Arc::new(store);
    STORE.set(Arc::clone(&store)).map_err(|_| {
        RepositoryError::construction_misuse_with_context(
            "A record store is already installed; use get_store()",
            ErrorContext::new("install_store"),
        )
    })?;
    info!("Record store installed ({} operators)", store.operator_count());
    Ok(store)
}

/// Get the process-wide store, `InvalidState` until one is installed.
pub fn get_store() -> RepositoryResult<Arc<RecordStore>> {
    STORE.get().cloned().ok_or_else(|| {
        RepositoryError::invalid_state_with_context(
            "Dataset not loaded yet. Call init_store() or install_store() first.",
            ErrorContext::new("get_store"),
        )
    })
}

/// Load the dataset named by `config` and install it, unless a store is
/// already installed, in which case the existing one is returned.
pub fn init_store(config: &AnalyticsConfig) -> RepositoryResult<Arc<RecordStore>> {
    if let Some(store) = STORE.get() {
        return Ok(Arc::clone(store));
    }
    let store = RecordStore::from_path(&config.dataset.path)?;
    match install_store(store) {
        Ok(store) => Ok(store),
        // Lost a race with another initializer; theirs wins.
        Err(RepositoryError::ConstructionMisuse { .. }) => get_store(),
        Err(e) => Err(e),
    }
}
