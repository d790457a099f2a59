//! Service layer: pure derivations over a [`DataRepository`](crate::db::DataRepository).
//!
//! Every function here is a read-only query over an immutable store. None of
//! them touch the process-wide slot; callers pass the repository in.

pub mod aggregates;
pub mod banners;
pub mod overdue;
pub mod shop_forecast;

#[cfg(test)]
#[path = "overdue_tests.rs"]
mod overdue_tests;

pub use aggregates::{
    class_gender_data, class_rarity_data, faction_data, height_data, historical_aggregate,
    historical_class_data, historical_faction_data, historical_gender_data,
    historical_race_data, historical_rarity_data, periodic_release_aggregate, race_data,
    rarity_gender_data, snapshot_aggregate, snapshot_aggregate_2d,
};
pub use banners::{
    banner_duration_series, latest_release_delay, release_delay_series, shop_debut_delay_series,
};
pub use overdue::{
    average_interval, category_average, exceeds_average, last_occurrence_wait, overdue_set,
    OverdueEntry,
};
pub use shop_forecast::{
    forecast_window_limits, recent_and_upcoming_shop_operators, shop_eligible_operators,
    ForecastParams, ShopForecast,
};
