use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::GeolocationError, model::Coordinates};

/// Device-location capability, as the view model sees it.
///
/// `is_available` mirrors the capability check a browser exposes before
/// `getCurrentPosition`; callers must not request a position when it
/// returns false.
#[async_trait]
pub trait GeolocationProvider: Send + Sync + Debug {
    fn is_available(&self) -> bool;

    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Geolocation backed by the user's configured home coordinates.
///
/// The terminal has no platform location service to ask, so the capability
/// exists exactly when `[home]` is present in the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    home: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(home: Option<Coordinates>) -> Self {
        Self { home }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.home_coordinates())
    }
}

#[async_trait]
impl GeolocationProvider for ConfiguredLocation {
    fn is_available(&self) -> bool {
        self.home.is_some()
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.home
            .ok_or_else(|| GeolocationError::Unavailable("no home coordinates configured".into()))
    }
}
