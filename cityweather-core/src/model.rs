use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of forecast steps the widget keeps: roughly the next 24 hours at
/// the API's 3-hour granularity.
pub const FORECAST_STEPS: usize = 8;

/// Geographic coordinates, as reported by a geolocation provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Point-in-time conditions for one location. Replaced wholesale on every
/// successful fetch and cleared on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Canonical place name resolved by the API; may differ from user input.
    pub location_name: String,
    pub temperature_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

impl CurrentWeather {
    /// Temperature rounded to the nearest whole degree, e.g. `19°C`.
    pub fn temperature_display(&self) -> String {
        format!("{}°C", self.temperature_c.round() as i64)
    }

    pub fn humidity_display(&self) -> String {
        format!("{}%", self.humidity_pct)
    }

    pub fn wind_display(&self) -> String {
        format!("{} m/s", self.wind_speed_mps)
    }
}

/// One future time-step prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp_utc: DateTime<Utc>,
    pub temperature_c: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_rounds_to_nearest_degree() {
        let current = CurrentWeather {
            location_name: "Paris".into(),
            temperature_c: 18.6,
            description: "clear sky".into(),
            humidity_pct: 60,
            wind_speed_mps: 3.4,
        };

        assert_eq!(current.temperature_display(), "19°C");
        assert_eq!(current.humidity_display(), "60%");
        assert_eq!(current.wind_display(), "3.4 m/s");
    }

    #[test]
    fn temperature_rounds_negative_values() {
        let current = CurrentWeather {
            location_name: "Oslo".into(),
            temperature_c: -3.4,
            description: "snow".into(),
            humidity_pct: 90,
            wind_speed_mps: 7.0,
        };

        assert_eq!(current.temperature_display(), "-3°C");
    }
}
