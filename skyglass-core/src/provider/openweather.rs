use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastEntry, LocationQuery},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const CURRENT: &str = "current weather";
const FORECAST: &str = "5-day forecast";

/// Format of the forecast `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(reqwest::StatusCode, String), FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        debug!(%status, endpoint, "OpenWeather responded");
        Ok((status, body))
    }

    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentWeather, FetchError> {
        let params = match query {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        };

        // The `cod` field decides success here, not the HTTP status.
        let (_, body) = self.get(CURRENT, "weather", &params).await?;

        let status: OwStatus = parse_json(CURRENT, &body)?;
        if !status.is_success() {
            return Err(FetchError::Provider {
                cod: status.cod_text(),
                message: status.message_text(),
            });
        }

        let parsed: OwCurrentResponse = parse_json(CURRENT, &body)?;

        let weather = parsed.weather.into_iter().next().ok_or(FetchError::MissingField {
            endpoint: CURRENT,
            field: "weather[0]",
        })?;

        Ok(CurrentWeather {
            city_name: parsed.name,
            country_code: parsed.sys.and_then(|s| s.country),
            condition_main: weather.main,
            description: weather.description,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_ms: parsed.wind.speed,
        })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let (status, body) = self
            .get(FORECAST, "forecast", &[("q", city.to_string())])
            .await?;

        if !status.is_success() {
            return Err(FetchError::Http {
                endpoint: FORECAST,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse = parse_json(FORECAST, &body)?;

        parsed
            .list
            .into_iter()
            .map(|entry| {
                let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
                    .map_err(|source| FetchError::Timestamp {
                        value: entry.dt_txt.clone(),
                        source,
                    })?;

                let weather = entry.weather.into_iter().next().ok_or(FetchError::MissingField {
                    endpoint: FORECAST,
                    field: "list[].weather[0]",
                })?;

                Ok(ForecastEntry {
                    timestamp,
                    condition_main: weather.main,
                    temp_max_c: entry.main.temp_max,
                    temp_min_c: entry.main.temp_min,
                })
            })
            .collect()
    }
}

/// `cod` is numeric on success but a string on most error bodies.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCod {
    Numeric(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    cod: Option<OwCod>,
    message: Option<serde_json::Value>,
}

impl OwStatus {
    fn is_success(&self) -> bool {
        matches!(self.cod, Some(OwCod::Numeric(200)))
    }

    fn cod_text(&self) -> String {
        match &self.cod {
            Some(OwCod::Numeric(n)) => n.to_string(),
            Some(OwCod::Text(s)) => s.clone(),
            None => "missing".to_string(),
        }
    }

    fn message_text(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "no message".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: Option<OwSys>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, FetchError> {
        self.fetch_current(query).await
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        self.fetch_forecast(city).await
    }
}

fn parse_json<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Parse { endpoint, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
