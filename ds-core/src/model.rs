use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Dark Sky unit systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Units {
    #[default]
    Si,
    Us,
    Ca,
    Uk2,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Si => "si",
            Units::Us => "us",
            Units::Ca => "ca",
            Units::Uk2 => "uk2",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Si, Units::Us, Units::Ca, Units::Uk2]
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Us => "°F",
            _ => "°C",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Units::Si => "m/s",
            Units::Ca => "km/h",
            Units::Us | Units::Uk2 => "mph",
        }
    }

    pub fn pressure_label(&self) -> &'static str {
        "hPa"
    }

    /// Temperature in Celsius, whatever unit system it was reported in.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            Units::Us => (value - 32.0) * 5.0 / 9.0,
            _ => value,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "si" => Ok(Units::Si),
            "us" => Ok(Units::Us),
            "ca" => Ok(Units::Ca),
            "uk2" => Ok(Units::Uk2),
            _ => Err(ConfigError::UnsupportedUnits(value.to_string())),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Units> for String {
    fn from(units: Units) -> Self {
        units.as_str().to_string()
    }
}

/// Time resolution of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Current,
    Today,
    Week,
}

impl Granularity {
    pub fn describe(&self) -> &'static str {
        match self {
            Granularity::Current => "current",
            Granularity::Today => "hourly",
            Granularity::Week => "weekly",
        }
    }
}

/// Latitude/longitude pair as stored in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            name: name.into(),
            latitude: coords.lat,
            longitude: coords.lon,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipType {
    Rain,
    Snow,
    Sleet,
}

/// One time slice of a Dark Sky forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub time: i64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub temperature_min: Option<f64>,
    #[serde(default)]
    pub temperature_max: Option<f64>,
    #[serde(default)]
    pub precip_probability: f64,
    #[serde(default)]
    pub precip_type: Option<PrecipType>,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub wind_speed: f64,
    /// Absent when the wind is calm.
    #[serde(default)]
    pub wind_bearing: Option<f64>,
    #[serde(default)]
    pub cloud_cover: f64,
    #[serde(default)]
    pub uv_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBlock {
    #[serde(default)]
    pub summary: Option<String>,
    pub data: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    /// UTC offset of the forecast location, in hours.
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub currently: Option<ForecastPoint>,
    #[serde(default)]
    pub hourly: Option<DataBlock>,
    #[serde(default)]
    pub daily: Option<DataBlock>,
}

impl ForecastResponse {
    /// Local time of `ts` at the forecast location.
    pub fn local_time(&self, ts: i64) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt((self.offset * 3600.0).round() as i32)
            .unwrap_or_else(|| Utc.fix());
        let utc = DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default();
        utc.with_timezone(&offset)
    }
}
