pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod i18n;
pub mod metrics;
pub mod preferences;
pub mod retry;
pub mod scheduler;
pub mod ui;
pub mod validation;
