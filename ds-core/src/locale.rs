use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{error::ConfigError, model::PrecipType};

/// Languages the table can be labelled in. Also sent to Dark Sky for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    Tr,
}

/// Column titles for the forecast table.
#[derive(Debug)]
pub struct ColumnLabels {
    pub temperature: &'static str,
    pub precipitation: &'static str,
    pub pressure: &'static str,
    pub wind: &'static str,
    pub clouds: &'static str,
    pub uv: &'static str,
    pub summary: &'static str,
}

/// Every user-visible word the renderer needs for one language.
#[derive(Debug)]
pub struct Localization {
    pub name: &'static str,
    /// Weekday names, Sunday first.
    pub days: [&'static str; 7],
    pub current: &'static str,
    pub columns: ColumnLabels,
    pub rain: &'static str,
    pub snow: &'static str,
    pub sleet: &'static str,
}

impl Localization {
    pub fn precip_type(&self, kind: PrecipType) -> &'static str {
        match kind {
            PrecipType::Rain => self.rain,
            PrecipType::Snow => self.snow,
            PrecipType::Sleet => self.sleet,
        }
    }
}

static ENGLISH: Localization = Localization {
    name: "English",
    days: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    current: "Current",
    columns: ColumnLabels {
        temperature: "Temperature",
        precipitation: "Precip",
        pressure: "Pressure",
        wind: "Wind",
        clouds: "Clouds",
        uv: "UV",
        summary: "Summary",
    },
    rain: "Rain",
    snow: "Snow",
    sleet: "Sleet",
};

static TURKISH: Localization = Localization {
    name: "Türkçe",
    days: [
        "Pazar",
        "Pazartesi",
        "Salı",
        "Çarşamba",
        "Perşembe",
        "Cuma",
        "Cumartesi",
    ],
    current: "Şu An",
    columns: ColumnLabels {
        temperature: "Derece",
        precipitation: "Tahmin",
        pressure: "Basınç",
        wind: "Rüzgar",
        clouds: "Bulut",
        uv: "UV",
        summary: "Sonuç",
    },
    rain: "Yağmur",
    snow: "Kar",
    sleet: "Sulu Kar",
};

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::En, Language::Tr]
    }

    pub fn localization(&self) -> &'static Localization {
        match self {
            Language::En => &ENGLISH,
            Language::Tr => &TURKISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "tr" => Ok(Language::Tr),
            _ => Err(ConfigError::UnsupportedLanguage(value.to_string())),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}
