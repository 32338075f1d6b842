use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, fs, path::Path, path::PathBuf, str::FromStr};
use tracing::debug;

use crate::{
    error::{ConfigError, LocationError},
    locale::Language,
    model::{Coordinates, Location, Units},
};

/// Settings readable and writable through [`Config::get_setting`] / [`Config::set_setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    ApiKey,
    Lang,
    Units,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ApiKey => "apikey",
            SettingKey::Lang => "lang",
            SettingKey::Units => "units",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "apikey" => Ok(SettingKey::ApiKey),
            "lang" => Ok(SettingKey::Lang),
            "units" => Ok(SettingKey::Units),
            _ => Err(ConfigError::UnknownSetting(value.to_string())),
        }
    }
}

/// Which columns the forecast table shows. The label column is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableColumns {
    pub show_temperature: bool,
    pub show_precip: bool,
    pub show_pressure: bool,
    pub show_wind: bool,
    pub show_clouds: bool,
    #[serde(rename = "showUV")]
    pub show_uv: bool,
    pub show_summary: bool,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            show_temperature: true,
            show_precip: true,
            show_pressure: true,
            show_wind: true,
            show_clouds: true,
            show_uv: true,
            show_summary: true,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example JSON:
/// ```json
/// {
///   "apikey": "...",
///   "lang": "en",
///   "units": "si",
///   "current": "Istanbul",
///   "cities": { "Istanbul": { "lat": 41.041512, "lon": 29.003836 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub apikey: String,
    pub lang: Language,
    pub units: Units,
    /// Name of the location used for forecasts.
    pub current: Option<String>,
    pub cities: BTreeMap<String, Coordinates>,
    pub table: TableColumns,
}

impl Config {
    pub fn get_setting(&self, key: SettingKey) -> String {
        match key {
            SettingKey::ApiKey => self.apikey.clone(),
            SettingKey::Lang => self.lang.to_string(),
            SettingKey::Units => self.units.to_string(),
        }
    }

    /// Parse and store a setting. On error the stored value is left untouched.
    pub fn set_setting(&mut self, key: SettingKey, value: &str) -> Result<(), ConfigError> {
        match key {
            SettingKey::ApiKey => self.apikey = value.trim().to_string(),
            SettingKey::Lang => self.lang = value.parse()?,
            SettingKey::Units => self.units = value.parse()?,
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.apikey.trim().is_empty()
    }

    /// Save a location, replacing the coordinates of an existing one with the same name.
    /// Returns the replaced coordinates, if any.
    pub fn add_location(
        &mut self,
        name: &str,
        lat: f64,
        lon: f64,
    ) -> Result<Option<Coordinates>, LocationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LocationError::EmptyName);
        }
        validate_latitude(lat)?;
        validate_longitude(lon)?;

        Ok(self.cities.insert(name.to_string(), Coordinates { lat, lon }))
    }

    /// All saved locations, ordered by name.
    pub fn list_locations(&self) -> Vec<Location> {
        self.cities
            .iter()
            .map(|(name, coords)| Location::new(name.clone(), *coords))
            .collect()
    }

    pub fn switch_current(&mut self, name: &str) -> Result<(), LocationError> {
        if !self.cities.contains_key(name) {
            return Err(LocationError::UnknownLocation(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Remove a saved location. Deleting the current location clears the pointer.
    pub fn delete_location(&mut self, name: &str) -> Result<Location, LocationError> {
        if self.cities.is_empty() {
            return Err(LocationError::NoSavedLocation);
        }
        let coords = self
            .cities
            .remove(name)
            .ok_or_else(|| LocationError::UnknownLocation(name.to_string()))?;

        if self.current.as_deref() == Some(name) {
            self.current = None;
        }

        Ok(Location::new(name, coords))
    }

    /// The location forecasts are fetched for. A dangling pointer yields `None`.
    pub fn current_location(&self) -> Option<Location> {
        let name = self.current.as_deref()?;
        self.cities.get(name).map(|coords| Location::new(name, *coords))
    }

    /// Like [`Config::current_location`], but tells an empty location set apart
    /// from saved locations with none selected.
    pub fn forecast_location(&self) -> Result<Location, LocationError> {
        match self.current_location() {
            Some(location) => Ok(location),
            None if self.cities.is_empty() => Err(LocationError::NoSavedLocation),
            None => Err(LocationError::NoCurrentLocation),
        }
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file yet, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), cities = cfg.cities.len(), "loaded config");
        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Platform path of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("net", "darksky", "ds").ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.json"))
    }
}

pub fn validate_latitude(lat: f64) -> Result<(), LocationError> {
    validate_coordinate("latitude", lat, 90.0)
}

pub fn validate_longitude(lon: f64) -> Result<(), LocationError> {
    validate_coordinate("longitude", lon, 180.0)
}

fn validate_coordinate(axis: &'static str, value: f64, limit: f64) -> Result<(), LocationError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(LocationError::InvalidCoordinate { axis, value, limit })
    }
}
