use crate::{
    Config,
    error::ApiError,
    model::{Coordinates, CurrentWeather, ForecastEntry},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Remote weather service, as the view model sees it.
///
/// The forecast list is returned in API order and untruncated; the view
/// model decides how many steps to keep.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn current_by_name(&self, city: &str) -> Result<CurrentWeather, ApiError>;

    async fn current_by_coords(&self, coords: Coordinates) -> Result<CurrentWeather, ApiError>;

    async fn forecast_by_name(&self, location_name: &str) -> Result<Vec<ForecastEntry>, ApiError>;
}

/// Construct the weather API client from config. Missing credentials fail
/// here, before any network call is attempted.
pub fn api_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherApi>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(openweather::OpenWeatherClient::new(api_key.to_owned())))
}
