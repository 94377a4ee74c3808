use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::ApiError,
    model::{Coordinates, CurrentWeather, ForecastEntry},
};

use super::WeatherApi;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the OpenWeatherMap current-conditions and forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_owned())
    }

    /// Point the client at a different host, e.g. a proxy or a test server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Payload(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastStep {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastStep>,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        CurrentWeather {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            description: first_description(&parsed.weather),
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        }
    }
}

#[async_trait::async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current_by_name(&self, city: &str) -> Result<CurrentWeather, ApiError> {
        let parsed: OwCurrentResponse =
            self.request("weather", &[("q", city.to_owned())]).await?;
        Ok(parsed.into())
    }

    async fn current_by_coords(&self, coords: Coordinates) -> Result<CurrentWeather, ApiError> {
        let parsed: OwCurrentResponse = self
            .request(
                "weather",
                &[
                    ("lat", coords.latitude.to_string()),
                    ("lon", coords.longitude.to_string()),
                ],
            )
            .await?;
        Ok(parsed.into())
    }

    async fn forecast_by_name(&self, location_name: &str) -> Result<Vec<ForecastEntry>, ApiError> {
        let parsed: OwForecastResponse =
            self.request("forecast", &[("q", location_name.to_owned())]).await?;

        // API order is chronological already; keep it as returned.
        let entries = parsed
            .list
            .into_iter()
            .map(|step| ForecastEntry {
                timestamp_utc: unix_to_utc(step.dt).unwrap_or_else(Utc::now),
                temperature_c: step.main.temp,
                description: first_description(&step.weather),
            })
            .collect();

        Ok(entries)
    }
}

fn first_description(weather: &[OwWeather]) -> String {
    weather.first().map(|w| w.description.clone()).unwrap_or_else(|| "Unknown".to_string())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::with_base_url("KEY".into(), server.uri())
    }

    #[tokio::test]
    async fn current_by_name_maps_response_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Paris",
                "main": { "temp": 18.6, "humidity": 60 },
                "weather": [{ "description": "clear sky" }],
                "wind": { "speed": 3.4 },
            })))
            .mount(&server)
            .await;

        let current = client_for(&server).current_by_name("Paris").await.unwrap();

        assert_eq!(current.location_name, "Paris");
        assert_eq!(current.temperature_c, 18.6);
        assert_eq!(current.description, "clear sky");
        assert_eq!(current.humidity_pct, 60);
        assert_eq!(current.wind_speed_mps, 3.4);
    }

    #[tokio::test]
    async fn current_by_coords_sends_lat_lon() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "48.85"))
            .and(query_param("lon", "2.35"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Paris",
                "main": { "temp": 12.0, "humidity": 70 },
                "weather": [{ "description": "light rain" }],
                "wind": { "speed": 5.1 },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let coords = Coordinates { latitude: 48.85, longitude: 2.35 };
        let current = client_for(&server).current_by_coords(coords).await.unwrap();

        assert_eq!(current.location_name, "Paris");
        assert_eq!(current.description, "light rain");
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body_excerpt() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).current_by_name("Nowhereville").await.unwrap_err();

        match err {
            ApiError::Status { endpoint, status, body } => {
                assert_eq!(endpoint, "weather");
                assert_eq!(status, 404);
                assert!(body.contains("city not found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn forecast_preserves_api_order_and_fills_missing_description() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    { "dt": 1_700_000_000, "main": { "temp": 18.0, "humidity": 60 },
                      "weather": [{ "description": "clear sky" }] },
                    { "dt": 1_700_010_800, "main": { "temp": 16.5, "humidity": 65 },
                      "weather": [] },
                ],
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server).forecast_by_name("Paris").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].timestamp_utc < entries[1].timestamp_utc);
        assert_eq!(entries[0].description, "clear sky");
        assert_eq!(entries[1].description, "Unknown");
        assert_eq!(entries[1].temperature_c, 16.5);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_payload_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).current_by_name("Paris").await.unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }
}
