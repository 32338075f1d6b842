//! Error types shared by the `ds` core library.

use reqwest::StatusCode;
use thiserror::Error;

/// Problems reading, writing or mutating the settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported language '{0}'. Supported languages: en, tr.")]
    UnsupportedLanguage(String),

    #[error("Unsupported units '{0}'. Supported units: si, us, ca, uk2.")]
    UnsupportedUnits(String),

    #[error("Unknown setting '{0}'. Known settings: apikey, lang, units.")]
    UnknownSetting(String),

    #[error("Could not determine platform config directory")]
    NoConfigDir,
}

/// Problems with the saved location set.
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("No saved location.\nHint: run `ds --add` to save one first.")]
    NoSavedLocation,

    #[error("No location selected.\nHint: run `ds --get` to pick a saved one.")]
    NoCurrentLocation,

    #[error("Unknown location '{0}'")]
    UnknownLocation(String),

    #[error("Location name must not be empty")]
    EmptyName,

    #[error("Invalid {axis} {value}: expected a value between -{limit} and {limit}")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
}

/// A failed forecast request. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to send request to Dark Sky")]
    Transport(#[source] reqwest::Error),

    #[error("Dark Sky rejected the API key ({status}).\nHint: check `apikey` with `ds --settings`.")]
    Unauthorized { status: StatusCode },

    #[error("Dark Sky request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse Dark Sky forecast JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Dark Sky response contained no '{0}' block")]
    MissingBlock(&'static str),
}

/// The payload cannot be turned into the requested table.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Forecast contained no '{0}' block")]
    MissingBlock(&'static str),
}
