use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// What a current-weather request is keyed by.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// City name as echoed back by the provider.
    pub city_name: String,
    pub country_code: Option<String>,
    /// Provider condition group, e.g. "Clear" or "Rain".
    pub condition_main: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
}

/// One 3-hourly record of the provider forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub condition_main: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
}

/// Representative entry for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub timestamp: NaiveDateTime,
    pub condition_main: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
}

impl From<&ForecastEntry> for ForecastDay {
    fn from(entry: &ForecastEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            condition_main: entry.condition_main.clone(),
            temp_max_c: entry.temp_max_c,
            temp_min_c: entry.temp_min_c,
        }
    }
}
