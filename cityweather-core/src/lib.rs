//! Core library for the `cityweather` terminal widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather API client and its trait seam
//! - Geolocation abstraction
//! - The view model driving the widget's state transitions
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod api;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod viewmodel;

pub use api::{WeatherApi, openweather::OpenWeatherClient};
pub use config::{Config, HomeLocation};
pub use error::{ApiError, GeolocationError, QueryError};
pub use location::{ConfiguredLocation, GeolocationProvider};
pub use model::{Coordinates, CurrentWeather, FORECAST_STEPS, ForecastEntry};
pub use viewmodel::{ViewState, WeatherViewModel};
