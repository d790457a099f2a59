pub mod analytics;
pub mod charts;
pub mod format;
pub mod home;
pub mod shop;
pub mod table;
