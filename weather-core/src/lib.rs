//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider behind a `WeatherProvider` trait
//! - Shared domain models (snapshots, daily summaries)
//! - The dashboard state container, fetch orchestration and notifications
//! - Forecast reduction and the display view model
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod forecast;
pub mod model;
pub mod notify;
pub mod orchestrator;
pub mod provider;
pub mod state;

pub use config::{Config, StaleResultPolicy};
pub use dashboard::Dashboard;
pub use display::DashboardView;
pub use error::FetchError;
pub use model::{Connectivity, DailySummary, ForecastEntry, ForecastSnapshot, WeatherSnapshot};
pub use notify::{Notification, NotificationKind, Notifier};
pub use orchestrator::{FetchOrchestrator, FetchOutcome};
pub use provider::WeatherProvider;
pub use state::{DashboardState, FetchTicket, FetchedData, Settlement};
