//! Pure mapping from provider data to what the view shows.

use crate::model::{ForecastDay, ForecastEntry};

/// Number of days kept by [`sample_daily`].
pub const FORECAST_DAYS: usize = 5;

/// Time of day of the entry representing a forecast day.
const NOON: &str = "12:00:00";

/// Background theme of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    ClearSky,
    Overcast,
    Rain,
    Storm,
    Snow,
    Haze,
    /// Only reachable when a caller passes "Night"; the provider never does.
    Night,
    Default,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::ClearSky => "clear-sky",
            Theme::Overcast => "overcast",
            Theme::Rain => "rain",
            Theme::Storm => "storm",
            Theme::Snow => "snow",
            Theme::Haze => "haze",
            Theme::Night => "night",
            Theme::Default => "default",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    Cloud,
    CloudRain,
    Bolt,
    Snowflake,
    Smog,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::Cloud => "cloud",
            Icon::CloudRain => "cloud-rain",
            Icon::Bolt => "bolt",
            Icon::Snowflake => "snowflake",
            Icon::Smog => "smog",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn theme_for(condition_main: Option<&str>) -> Theme {
    match condition_main {
        Some("Clear") => Theme::ClearSky,
        Some("Clouds") => Theme::Overcast,
        Some("Rain" | "Drizzle") => Theme::Rain,
        Some("Thunderstorm") => Theme::Storm,
        Some("Snow") => Theme::Snow,
        Some("Mist" | "Fog") => Theme::Haze,
        Some("Night") => Theme::Night,
        _ => Theme::Default,
    }
}

/// Unlike [`theme_for`], the fallback shares its token with mist and fog.
pub fn icon_for(condition_main: Option<&str>) -> Icon {
    match condition_main {
        Some("Clear") => Icon::Sun,
        Some("Clouds") => Icon::Cloud,
        Some("Rain" | "Drizzle") => Icon::CloudRain,
        Some("Thunderstorm") => Icon::Bolt,
        Some("Snow") => Icon::Snowflake,
        Some("Mist" | "Fog") => Icon::Smog,
        _ => Icon::Smog,
    }
}

/// Whether the entry's textual time of day is noon.
pub fn is_noon(entry: &ForecastEntry) -> bool {
    entry.timestamp.format("%H:%M:%S").to_string() == NOON
}

/// Reduce a 3-hourly forecast to at most [`FORECAST_DAYS`] noon entries,
/// keeping the input order. Short inputs yield fewer days; nothing is padded.
pub fn sample_daily(entries: &[ForecastEntry]) -> Vec<ForecastDay> {
    entries
        .iter()
        .filter(|entry| is_noon(entry))
        .take(FORECAST_DAYS)
        .map(ForecastDay::from)
        .collect()
}
