//! Core library for the `skyglass` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Location resolution with a fallback city
//! - Presentation mapping (themes, icons, daily forecast sampling)
//! - The view state and the controller that drives fetches into it
//!
//! It is used by `skyglass-cli`, but any front end can drive `WeatherApp`.

pub mod app;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod state;

pub use app::WeatherApp;
pub use config::{Config, DEFAULT_CITY};
pub use error::{FETCH_ERROR_MESSAGE, FetchError, LocationError};
pub use location::{FixedPosition, LocationService, NoLocationService, Origin};
pub use model::{Coordinates, CurrentWeather, ForecastDay, ForecastEntry, LocationQuery};
pub use presentation::{Icon, Theme, icon_for, sample_daily, theme_for};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use state::{FetchStatus, SearchForm, ViewState};
