//! Application controller: owns the view state and runs fetches.
//!
//! Every fetch runs as its own task and reports back over a channel. Updates
//! are applied in arrival order, so when requests overlap the last response
//! to arrive wins. Nothing is cancelled and nothing times out.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    location::{LocationService, Origin, resolve_origin},
    model::{Coordinates, LocationQuery},
    presentation::sample_daily,
    provider::WeatherProvider,
    state::{CurrentSource, Update, ViewState},
};

pub struct WeatherApp {
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
    state: ViewState,
    tx: mpsc::UnboundedSender<Update>,
    rx: mpsc::UnboundedReceiver<Update>,
    /// Requests issued whose completion has not been applied yet.
    pending: usize,
    mounted: bool,
}

impl WeatherApp {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            default_city: default_city.into(),
            state: ViewState::default(),
            tx,
            rx,
            pending: 0,
            mounted: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Whether every issued request has been applied.
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }

    /// Resolve the starting location and issue the first fetch.
    ///
    /// Runs once per session; later calls do nothing.
    pub async fn mount(&mut self, location: &dyn LocationService) {
        if self.mounted {
            debug!("Already mounted, skipping location resolution");
            return;
        }
        self.mounted = true;

        match resolve_origin(location, &self.default_city).await {
            Origin::Coordinates(coords) => self.fetch_current_by_coordinates(coords),
            Origin::Fallback(city) => self.fetch_current_by_city(&city),
        }
    }

    /// Text field edits from the user.
    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.state.search_mut().set_input(value);
    }

    /// Submit the search form. Returns `false`, touching nothing, when the
    /// trimmed input is empty.
    pub fn submit_search(&mut self) -> bool {
        let Some(city) = self.state.search_mut().take_query() else {
            return false;
        };

        debug!(%city, "Search submitted");
        self.fetch_current_by_city(&city);
        self.fetch_forecast_by_city(&city);
        true
    }

    /// Current conditions by city name. Does not chain a forecast.
    pub fn fetch_current_by_city(&mut self, name: &str) {
        self.begin_current();

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let query = LocationQuery::City(name.to_string());

        tokio::spawn(async move {
            let result = provider.current(&query).await;
            let _ = tx.send(Update::CurrentSettled { source: CurrentSource::City, result });
        });
    }

    /// Current conditions by position, followed on success by the forecast
    /// for the city name the provider resolved.
    pub fn fetch_current_by_coordinates(&mut self, coords: Coordinates) {
        self.begin_current();

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = provider.current(&LocationQuery::Coordinates(coords)).await;
            let resolved = result.as_ref().ok().map(|w| w.city_name.clone());

            // Announce the forecast before settling the current request so
            // the pending count never drops to zero mid-chain.
            if resolved.is_some() {
                let _ = tx.send(Update::ForecastRequested);
            }
            let _ = tx.send(Update::CurrentSettled { source: CurrentSource::Coordinates, result });

            if let Some(city) = resolved {
                debug!(%city, "Chaining forecast for resolved city");
                let result = provider.forecast(&city).await.map(|entries| sample_daily(&entries));
                let _ = tx.send(Update::ForecastSettled(result));
            }
        });
    }

    /// 5-day forecast by city name, reduced to one entry per day.
    pub fn fetch_forecast_by_city(&mut self, name: &str) {
        self.pending += 1;
        self.state.begin_forecast();

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let city = name.to_string();

        tokio::spawn(async move {
            let result = provider.forecast(&city).await.map(|entries| sample_daily(&entries));
            let _ = tx.send(Update::ForecastSettled(result));
        });
    }

    /// Wait for the next completion and apply it. Returns `false` when no
    /// request is outstanding.
    pub async fn next_update(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }

        // The app holds a sender itself, so the channel never closes.
        let Some(update) = self.rx.recv().await else {
            return false;
        };

        match update {
            Update::ForecastRequested => self.pending += 1,
            Update::CurrentSettled { .. } | Update::ForecastSettled(_) => {
                self.pending = self.pending.saturating_sub(1);
            }
        }
        self.state.apply(update);
        true
    }

    /// Apply completions until every outstanding request has resolved.
    pub async fn settle(&mut self) {
        while self.next_update().await {}
    }

    fn begin_current(&mut self) {
        self.pending += 1;
        self.state.begin_current();
    }
}
