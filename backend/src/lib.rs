//! # Headhunt Analytics
//!
//! Data-repository core of a headhunting (gacha) analytics dashboard.
//!
//! The crate loads a static dataset of operators and banners once, keeps it
//! immutable for the life of the process, and derives every series the
//! dashboard renders from it: cumulative and snapshot category counts,
//! quarterly release breakdowns, banner durations, shop-debut and regional
//! release delays, a certificate-shop debut forecast, and overdue rankings.
//!
//! ## Architecture
//!
//! - [`models`]: operators, banners, regions and millisecond timestamps
//! - [`db`]: the record store, its chronological index and the process-wide slot
//! - [`services`]: pure derivations over a [`db::DataRepository`]
//! - [`routes`]: chart/table adapters and page payloads
//! - [`api`]: consolidated DTO re-exports
//! - [`config`]: TOML configuration
//!
//! ## Example
//!
//! ```no_run
//! use headhunt_analytics::config::AnalyticsConfig;
//! use headhunt_analytics::db::init_store;
//! use headhunt_analytics::models::Timestamp;
//! use headhunt_analytics::routes::home::get_home_data;
//!
//! let config = AnalyticsConfig::load()?;
//! let store = init_store(&config)?;
//! let home = get_home_data(store.as_ref(), &config, Timestamp::now())?;
//! println!("{} operators on record", home.operator_count);
//! # Ok::<(), headhunt_analytics::db::RepositoryError>(())
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;
