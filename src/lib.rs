//! Core library for the `skywx` terminal weather dashboard.
//!
//! This crate defines:
//! - Environment-backed configuration and the weather API client
//! - Derived projections of the API's day list (today + five-day forecast)
//! - The debounced search controller and background fetch worker
//! - The ratatui application itself
//!
//! The `skywx` binary is a thin wrapper around [`app::run`].

pub mod app;
pub mod config;
pub mod debounce;
pub mod fetch;
pub mod format;
pub mod icon;
pub mod units;
pub mod views;
pub mod visualcrossing;

pub use config::Config;
pub use units::Unit;
pub use visualcrossing::{DayRecord, FetchError, WeatherResponse};
