use crate::{
    Config,
    error::FetchError,
    model::{CurrentWeather, ForecastEntry, LocationQuery},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Remote source of current conditions and the 5-day/3-hour forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, FetchError>;

    /// Full 3-hourly forecast for a city, in provider (chronological) order.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `skyglass configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    Ok(Arc::new(OpenWeatherProvider::with_base_url(
        api_key,
        config.base_url(),
    )))
}
