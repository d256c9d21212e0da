use std::fmt::Write;

use skyglass_core::{ForecastDay, Icon, ViewState, icon_for, theme_for};

const LOADING: &str = "Loading weather data...";

/// Date labels always use the English locale, e.g. "Mon 14 Oct".
const DAY_LABEL: &str = "%a %d %b";

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Sun => "☀",
        Icon::Cloud => "☁",
        Icon::CloudRain => "🌧",
        Icon::Bolt => "⚡",
        Icon::Snowflake => "❄",
        Icon::Smog => "🌫",
    }
}

/// Render the whole view as plain text.
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    let condition = state.current().map(|w| w.condition_main.as_str());

    let _ = writeln!(out, "[{}]", theme_for(condition));

    if let Some(error) = state.error() {
        let _ = writeln!(out, "{error}");
    }

    match state.current() {
        Some(weather) => {
            let place = match &weather.country_code {
                Some(country) => format!("{}, {country}", weather.city_name),
                None => weather.city_name.clone(),
            };
            let _ = writeln!(out, "{} {place}", glyph(icon_for(condition)));
            let _ = writeln!(out, "  {} °C", weather.temperature_c);
            let _ = writeln!(out, "  Weather: {}", weather.description);
            let _ = writeln!(out, "  Humidity: {}%", weather.humidity_pct);
            let _ = writeln!(out, "  Wind Speed: {} m/s", weather.wind_speed_ms);
        }
        None if state.error().is_none() => {
            let _ = writeln!(out, "{LOADING}");
        }
        None => {}
    }

    if !state.forecast().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "5-day forecast");
        for day in state.forecast() {
            let _ = writeln!(out, "{}", forecast_line(day));
        }
    }

    out
}

fn forecast_line(day: &ForecastDay) -> String {
    format!(
        "  {}  {}  {:<12} {:>5.1}° / {:>5.1}°",
        day.timestamp.format(DAY_LABEL),
        glyph(icon_for(Some(day.condition_main.as_str()))),
        day.condition_main,
        day.temp_max_c,
        day.temp_min_c,
    )
}
