use thiserror::Error;

/// Message shown to the user for any failed current-weather fetch.
///
/// Causes are deliberately not distinguished in the view; the typed
/// [`FetchError`] only reaches the logs.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching weather data. Please try again.";

/// Failure of a single request to the weather provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to send request to OpenWeather ({endpoint})")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Http {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("OpenWeather reported status {cod}: {message}")]
    Provider { cod: String, message: String },

    #[error("Failed to parse OpenWeather {endpoint} JSON")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("OpenWeather {endpoint} response is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    #[error("Invalid forecast timestamp '{value}'")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Location service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Position unavailable")]
    PositionUnavailable,
}
