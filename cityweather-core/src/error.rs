//! Error types shared across the widget.
//!
//! `QueryError` carries the exact human-readable message shown in the
//! widget's error slot; the lower-level enums describe what the external
//! collaborators reported.

/// Terminal outcome of a user-visible query. `Display` is the message the
/// view renders; each new error replaces the prior one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("City not found")]
    CityNotFound,

    #[error("Network error, please try again")]
    NetworkFailure,

    #[error("Geolocation not supported")]
    GeolocationUnsupported,

    #[error("Location access denied")]
    LocationDenied,

    #[error("Could not load weather for your location")]
    LocationWeatherUnavailable,
}

impl QueryError {
    /// Map a weather-service failure from a city query: a non-2xx status
    /// means the city could not be resolved, anything else is transport.
    pub(crate) fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Status { .. } => QueryError::CityNotFound,
            ApiError::Transport(_) | ApiError::Payload(_) => QueryError::NetworkFailure,
        }
    }
}

/// Failures reported by the weather service client.
///
/// `Transport` stores rendered error text rather than the reqwest error
/// itself so test doubles can construct every variant.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status { endpoint: &'static str, status: u16, body: String },

    #[error("failed to reach the weather service: {0}")]
    Transport(String),

    #[error("unexpected weather service payload: {0}")]
    Payload(String),
}

/// Failures reported by a geolocation provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    Denied,

    #[error("location service unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failures_map_to_city_not_found() {
        let err = ApiError::Status { endpoint: "weather", status: 404, body: "{}".into() };
        assert_eq!(QueryError::from_api(&err), QueryError::CityNotFound);
    }

    #[test]
    fn transport_and_payload_failures_map_to_network() {
        let transport = ApiError::Transport("connection refused".into());
        let payload = ApiError::Payload("missing field `main`".into());

        assert_eq!(QueryError::from_api(&transport), QueryError::NetworkFailure);
        assert_eq!(QueryError::from_api(&payload), QueryError::NetworkFailure);
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(QueryError::EmptyQuery.to_string(), "Please enter a city name");
        assert_eq!(QueryError::CityNotFound.to_string(), "City not found");
        assert_eq!(QueryError::GeolocationUnsupported.to_string(), "Geolocation not supported");
    }
}
