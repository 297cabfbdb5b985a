//! Core library for the `weatherdash` CLI.
//!
//! This crate defines:
//! - Resolution of raw user input into a forecast query
//! - The forecast and geocoding providers behind small async traits
//! - The presenter that shapes a payload into snapshot, daily and hourly series
//! - Threshold alerts, condition emoji and display-ready dashboard records
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod alert;
pub mod config;
pub mod display;
pub mod emoji;
pub mod error;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod resolver;

pub use config::{Config, ForecastConfig, GeocodingConfig, ResolverConfig};
pub use display::{DashboardView, Theme};
pub use emoji::condition_to_emoji;
pub use error::{PresentationError, ProviderError, ResolutionError};
pub use model::{
    Alert, AlertConfig, AlertResult, Coordinate, DailyForecastPoint, Forecast, ForecastSnapshot,
    HourlyForecastPoint, LocationQuery,
};
pub use presenter::ForecastPresenter;
pub use provider::{ForecastSource, Geocoder};
pub use resolver::resolve;
