//! Core library for the `ds` command-line tool.
//!
//! This crate defines:
//! - The settings document and saved locations
//! - The Dark Sky forecast client
//! - Forecast payload models and localization
//! - Rendering a forecast into a colored table
//!
//! It is used by `ds-cli`, but holds no terminal interaction of its own beyond
//! producing the table text.

pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, SettingKey, TableColumns};
pub use error::{ConfigError, FetchError, LocationError, RenderError};
pub use locale::{Language, Localization};
pub use model::{ForecastPoint, ForecastResponse, Granularity, Location, Units};
pub use provider::{DarkSkyProvider, ForecastProvider, ForecastRequest};
pub use render::{Renderer, Table};
