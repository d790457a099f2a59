//! Headhunt report binary
//!
//! Loads the configuration and dataset, then prints one dashboard payload as
//! JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! headhunt-report [home|analytics|shop|table] [table quick filter...]
//! ```
//!
//! # Environment Variables
//!
//! - `HEADHUNT_CONFIG`: configuration file (default: `headhunt.toml` lookup)
//! - `HEADHUNT_DATASET`: dataset path, overrides the configuration
//! - `RUST_LOG`: log level (default: info)

use anyhow::{bail, Context};
use log::info;
use std::env;

use headhunt_analytics::config::AnalyticsConfig;
use headhunt_analytics::db::{self, ImageIndex};
use headhunt_analytics::models::Timestamp;
use headhunt_analytics::routes::{analytics, home, shop, table};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let page = args.next().unwrap_or_else(|| "home".to_string());
    let query = args.collect::<Vec<_>>().join(" ");

    let config = AnalyticsConfig::load().context("Failed to load configuration")?;
    let store = db::init_store(&config).context("Failed to load dataset")?;
    let now = Timestamp::now();
    info!(
        "Rendering '{}' for {} as of {}",
        page,
        config.analysis.region,
        now.date_label()
    );

    let images = match &config.dataset.images_path {
        Some(path) => {
            let images = ImageIndex::from_path(path).context("Failed to load image map")?;
            info!("Image map loaded: {} entries", images.len());
            Some(images)
        }
        None => None,
    };

    let repo = store.as_ref();
    let json = match page.as_str() {
        "home" => {
            let mut data = home::get_home_data(repo, &config, now)?;
            if let Some(images) = &images {
                data.attach_portraits(images);
            }
            serde_json::to_string_pretty(&data)?
        }
        "analytics" => serde_json::to_string_pretty(&analytics::get_analytics_data(repo, &config)?)?,
        "shop" => {
            let mut data = shop::get_shop_forecast(repo, &config, now)?;
            if let Some(images) = &images {
                data.attach_portraits(images);
            }
            serde_json::to_string_pretty(&data)?
        }
        "table" => {
            let rows = table::get_operator_table(repo, config.analysis.region, now);
            serde_json::to_string_pretty(&table::quick_filter(&rows, &query))?
        }
        other => bail!(
            "Unknown page '{}'. Valid options: home, analytics, shop, table",
            other
        ),
    };
    println!("{}", json);
    Ok(())
}
