//! View state and the completion events that update it.

use tracing::warn;

use crate::{
    error::{FETCH_ERROR_MESSAGE, FetchError},
    model::{CurrentWeather, ForecastDay},
};

/// Progress of one kind of fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// How a current-weather request was keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentSource {
    City,
    Coordinates,
}

/// Completion events produced by fetch tasks.
#[derive(Debug)]
pub enum Update {
    CurrentSettled {
        source: CurrentSource,
        result: Result<CurrentWeather, FetchError>,
    },
    /// A forecast was chained after a coordinate lookup.
    ForecastRequested,
    ForecastSettled(Result<Vec<ForecastDay>, FetchError>),
}

/// The single text field of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    input: String,
}

impl SearchForm {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn push_str(&mut self, keystrokes: &str) {
        self.input.push_str(keystrokes);
    }

    /// Take the trimmed query and clear the field; `None` (field untouched)
    /// when there is nothing but whitespace.
    pub fn take_query(&mut self) -> Option<String> {
        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();
        self.input.clear();
        Some(query)
    }
}

/// Everything the view renders.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    current: Option<CurrentWeather>,
    error: Option<String>,
    current_status: FetchStatus,
    forecast: Vec<ForecastDay>,
    forecast_status: FetchStatus,
    resolved_city: Option<String>,
    search: SearchForm,
}

impl ViewState {
    pub fn current(&self) -> Option<&CurrentWeather> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_status(&self) -> FetchStatus {
        self.current_status
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn forecast_status(&self) -> FetchStatus {
        self.forecast_status
    }

    /// Last city name echoed back by the provider.
    pub fn resolved_city(&self) -> Option<&str> {
        self.resolved_city.as_deref()
    }

    pub fn search(&self) -> &SearchForm {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchForm {
        &mut self.search
    }

    /// Previous results stay visible while loading.
    pub fn begin_current(&mut self) {
        self.current_status = FetchStatus::Loading;
    }

    pub fn begin_forecast(&mut self) {
        self.forecast_status = FetchStatus::Loading;
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::CurrentSettled { source, result } => self.settle_current(source, result),
            Update::ForecastRequested => self.begin_forecast(),
            Update::ForecastSettled(result) => self.settle_forecast(result),
        }
    }

    fn settle_current(&mut self, source: CurrentSource, result: Result<CurrentWeather, FetchError>) {
        match result {
            Ok(weather) => {
                self.resolved_city = Some(weather.city_name.clone());
                if source == CurrentSource::Coordinates {
                    self.search.set_input(weather.city_name.clone());
                }
                self.current = Some(weather);
                self.error = None;
                self.current_status = FetchStatus::Loaded;
            }
            Err(err) => {
                warn!(error = %err, ?source, "Current weather fetch failed");
                self.current = None;
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.current_status = FetchStatus::Failed;
            }
        }
    }

    // Forecast failures never reach the user; the previous list stays.
    fn settle_forecast(&mut self, result: Result<Vec<ForecastDay>, FetchError>) {
        match result {
            Ok(days) => {
                self.forecast = days;
                self.forecast_status = FetchStatus::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "Forecast fetch failed");
                self.forecast_status = FetchStatus::Failed;
            }
        }
    }
}
