//! The widget's state container.
//!
//! All state lives in one [`ViewState`] owned by [`WeatherViewModel`] and is
//! mutated only through its operations; a render callback fires with a
//! snapshot after every transition. Execution is single-threaded and
//! cooperative: the only suspension points are the API and geolocation
//! awaits, so interior mutability needs no locks. State borrows are never
//! held across an await.

use std::cell::{Cell, RefCell};

use crate::{
    api::WeatherApi,
    error::QueryError,
    location::GeolocationProvider,
    model::{CurrentWeather, FORECAST_STEPS, ForecastEntry},
};

/// Everything the view renders: the query lifecycle plus the fetched data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Last text the user submitted.
    pub city_input: String,

    /// A network-backed query is in flight.
    pub loading: bool,

    /// Message for the error slot; replaced by each new failure, cleared on
    /// the next query.
    pub error: Option<String>,

    /// Current conditions card (None until the first successful fetch).
    pub current: Option<CurrentWeather>,

    /// Forecast grid, at most [`FORECAST_STEPS`] entries in API order.
    pub forecast: Vec<ForecastEntry>,
}

type RenderFn = Box<dyn FnMut(&ViewState)>;

/// State container driving the weather widget.
///
/// Queries carry a monotonically increasing token; a response whose token is
/// no longer the latest issued is discarded, so the most recently submitted
/// query always wins regardless of response order.
pub struct WeatherViewModel {
    api: Box<dyn WeatherApi>,
    geolocation: Box<dyn GeolocationProvider>,
    state: RefCell<ViewState>,
    render: RefCell<RenderFn>,
    latest_token: Cell<u64>,
}

impl WeatherViewModel {
    pub fn new(api: Box<dyn WeatherApi>, geolocation: Box<dyn GeolocationProvider>) -> Self {
        Self {
            api,
            geolocation,
            state: RefCell::new(ViewState::default()),
            render: RefCell::new(Box::new(|_| {})),
            latest_token: Cell::new(0),
        }
    }

    /// Install the render callback. It receives a snapshot of the new state
    /// after every transition.
    pub fn set_render(&self, render: impl FnMut(&ViewState) + 'static) {
        *self.render.borrow_mut() = Box::new(render);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Handle a submitted city query.
    ///
    /// Whitespace-only input fails locally without touching the network.
    /// Otherwise fetches current conditions, then the forecast for the
    /// resolved location name; the forecast is best-effort.
    pub async fn submit_city_query(&self, input: &str) {
        let city = input.trim().to_owned();

        if city.is_empty() {
            let input = input.to_owned();
            self.apply(|s| {
                s.city_input = input;
                s.error = Some(QueryError::EmptyQuery.to_string());
                s.current = None;
                s.forecast.clear();
            });
            return;
        }

        let token = self.issue_token();
        {
            let input = input.to_owned();
            self.apply(|s| {
                s.city_input = input;
                s.loading = true;
                s.error = None;
            });
        }

        match self.api.current_by_name(&city).await {
            Ok(current) => {
                if !self.is_latest(token) {
                    tracing::debug!(token, city = %city, "discarding stale current-conditions response");
                    return;
                }
                let resolved = current.location_name.clone();
                // Current conditions and forecast refresh together: drop the
                // previous forecast so a failed refetch leaves it empty
                // rather than stale.
                self.apply(|s| {
                    s.error = None;
                    s.current = Some(current);
                    s.forecast.clear();
                });
                self.fetch_forecast_for(&resolved, token).await;
                if self.is_latest(token) {
                    self.apply(|s| s.loading = false);
                }
            }
            Err(err) => {
                if !self.is_latest(token) {
                    tracing::debug!(token, city = %city, "discarding stale failure response");
                    return;
                }
                tracing::debug!(error = %err, city = %city, "current-conditions fetch failed");
                let kind = QueryError::from_api(&err);
                self.apply(|s| {
                    s.loading = false;
                    s.error = Some(kind.to_string());
                    s.current = None;
                    s.forecast.clear();
                });
            }
        }
    }

    /// Seed the widget from the device location. Runs once at startup in
    /// interactive mode.
    pub async fn use_location_weather(&self) {
        if !self.geolocation.is_available() {
            self.apply(|s| s.error = Some(QueryError::GeolocationUnsupported.to_string()));
            return;
        }

        let coords = match self.geolocation.current_position().await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::debug!(error = %err, "geolocation lookup failed");
                self.apply(|s| s.error = Some(QueryError::LocationDenied.to_string()));
                return;
            }
        };

        let token = self.issue_token();
        self.apply(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.api.current_by_coords(coords).await {
            Ok(current) => {
                if !self.is_latest(token) {
                    tracing::debug!(token, "discarding stale location-weather response");
                    return;
                }
                // Forecast is keyed by the name the API resolved, not by
                // anything the user typed.
                let resolved = current.location_name.clone();
                self.apply(|s| {
                    s.error = None;
                    s.current = Some(current);
                    s.forecast.clear();
                });
                self.fetch_forecast_for(&resolved, token).await;
                if self.is_latest(token) {
                    self.apply(|s| s.loading = false);
                }
            }
            Err(err) => {
                if !self.is_latest(token) {
                    tracing::debug!(token, "discarding stale location-weather failure");
                    return;
                }
                tracing::debug!(error = %err, "location weather fetch failed");
                self.apply(|s| {
                    s.loading = false;
                    s.error = Some(QueryError::LocationWeatherUnavailable.to_string());
                    s.current = None;
                    s.forecast.clear();
                });
            }
        }
    }

    /// Fetch the forecast for a resolved location name, best-effort: current
    /// conditions stay displayed on failure and the user sees no error.
    async fn fetch_forecast_for(&self, location_name: &str, token: u64) {
        match self.api.forecast_by_name(location_name).await {
            Ok(entries) => {
                if !self.is_latest(token) {
                    tracing::debug!(token, "discarding stale forecast response");
                    return;
                }
                self.apply(|s| {
                    s.forecast = entries.into_iter().take(FORECAST_STEPS).collect();
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, location = %location_name, "forecast fetch failed");
            }
        }
    }

    fn issue_token(&self) -> u64 {
        let token = self.latest_token.get() + 1;
        self.latest_token.set(token);
        token
    }

    fn is_latest(&self, token: u64) -> bool {
        self.latest_token.get() == token
    }

    /// Mutate state, then invoke the render callback with a snapshot. The
    /// state borrow is released first, so the callback may call `state()`.
    fn apply(&self, mutate: impl FnOnce(&mut ViewState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        (self.render.borrow_mut())(&snapshot);
    }
}
