use async_trait::async_trait;
use std::fmt::{self, Debug};

use crate::{
    Config, ForecastResponse,
    error::FetchError,
    locale::Language,
    model::{Granularity, Location, Units},
};

pub mod darksky;

pub use darksky::DarkSkyProvider;

/// Blocks of a Dark Sky forecast that can be left out of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Currently,
    Minutely,
    Hourly,
    Daily,
    Alerts,
    Flags,
}

impl Block {
    pub fn as_str(&self) -> &'static str {
        match self {
            Block::Currently => "currently",
            Block::Minutely => "minutely",
            Block::Hourly => "hourly",
            Block::Daily => "daily",
            Block::Alerts => "alerts",
            Block::Flags => "flags",
        }
    }

    /// Blocks not needed to render `granularity`.
    pub fn excluded_for(granularity: Granularity) -> &'static [Block] {
        match granularity {
            Granularity::Current => &[
                Block::Minutely,
                Block::Hourly,
                Block::Daily,
                Block::Alerts,
                Block::Flags,
            ],
            Granularity::Today => &[Block::Minutely, Block::Daily, Block::Alerts, Block::Flags],
            Granularity::Week => &[
                Block::Currently,
                Block::Minutely,
                Block::Hourly,
                Block::Alerts,
                Block::Flags,
            ],
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub lang: Language,
    pub units: Units,
    pub granularity: Granularity,
}

impl ForecastRequest {
    /// Request for the config's language and units at `location`.
    pub fn for_location(config: &Config, location: &Location, granularity: Granularity) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            lang: config.lang,
            units: config.units,
            granularity,
        }
    }

    pub fn exclude(&self) -> &'static [Block] {
        Block::excluded_for(self.granularity)
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, request: &ForecastRequest) -> Result<ForecastResponse, FetchError>;
}
