//! Turns a forecast payload into the colored table printed by `ds`.

use chrono::Datelike;
use crossterm::style::Color;

use crate::{
    config::{Config, TableColumns},
    error::RenderError,
    locale::{Language, Localization},
    model::{ForecastPoint, ForecastResponse, Granularity, Units},
};

pub mod format;
pub mod table;

pub use table::{Cell, Span, Table};

use table::fg_bold;

/// Number of hourly rows shown for the "today" table.
pub const HOURLY_WINDOW: usize = 24;

#[derive(Debug, Clone)]
pub struct Renderer {
    locale: &'static Localization,
    units: Units,
    columns: TableColumns,
}

impl Renderer {
    pub fn new(lang: Language, units: Units, columns: TableColumns) -> Self {
        Self {
            locale: lang.localization(),
            units,
            columns,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.lang, config.units, config.table)
    }

    /// Build the table for one granularity. The first row is the header.
    pub fn table(
        &self,
        response: &ForecastResponse,
        granularity: Granularity,
        title: &str,
    ) -> Result<Table, RenderError> {
        let points: Vec<&ForecastPoint> = match granularity {
            Granularity::Current => vec![
                response
                    .currently
                    .as_ref()
                    .ok_or(RenderError::MissingBlock("currently"))?,
            ],
            Granularity::Today => response
                .hourly
                .as_ref()
                .ok_or(RenderError::MissingBlock("hourly"))?
                .data
                .iter()
                .take(HOURLY_WINDOW)
                .collect(),
            Granularity::Week => response
                .daily
                .as_ref()
                .ok_or(RenderError::MissingBlock("daily"))?
                .data
                .iter()
                .collect(),
        };

        let title = match title.trim() {
            "" => response.timezone.as_str(),
            name => name,
        };

        let mut table = Table::new();
        table.push_row(self.header(title));

        for (index, point) in points.iter().enumerate() {
            let previous = if index == 0 { point } else { &points[index - 1] };
            let label = self.label(response, point, granularity);
            table.push_row(self.row(label, point, previous, granularity));
        }

        Ok(table)
    }

    fn header(&self, title: &str) -> Vec<Cell> {
        let labels = &self.locale.columns;
        let columns = [
            (self.columns.show_temperature, labels.temperature),
            (self.columns.show_precip, labels.precipitation),
            (self.columns.show_pressure, labels.pressure),
            (self.columns.show_wind, labels.wind),
            (self.columns.show_clouds, labels.clouds),
            (self.columns.show_uv, labels.uv),
            (self.columns.show_summary, labels.summary),
        ];

        std::iter::once(title)
            .chain(columns.into_iter().filter(|(shown, _)| *shown).map(|(_, l)| l))
            .map(|text| Cell::styled(text, fg_bold(Color::Green)))
            .collect()
    }

    fn label(
        &self,
        response: &ForecastResponse,
        point: &ForecastPoint,
        granularity: Granularity,
    ) -> Cell {
        let text = match granularity {
            Granularity::Current => self.locale.current.to_string(),
            Granularity::Today => response.local_time(point.time).format("%H:%M").to_string(),
            Granularity::Week => {
                let weekday = response.local_time(point.time).weekday();
                self.locale.days[weekday.num_days_from_sunday() as usize].to_string()
            }
        };
        Cell::styled(text, fg_bold(Color::Green))
    }

    fn row(
        &self,
        label: Cell,
        point: &ForecastPoint,
        previous: &ForecastPoint,
        granularity: Granularity,
    ) -> Vec<Cell> {
        let mut row = vec![label];

        if self.columns.show_temperature {
            row.push(self.temperature(point, granularity));
        }
        if self.columns.show_precip {
            row.push(format::precipitation(
                point.precip_probability,
                point.precip_type,
                self.locale,
            ));
        }
        if self.columns.show_pressure {
            row.push(format::pressure(point.pressure, previous.pressure, self.units));
        }
        if self.columns.show_wind {
            row.push(format::wind(point.wind_speed, point.wind_bearing, self.units));
        }
        if self.columns.show_clouds {
            row.push(format::clouds(point.cloud_cover));
        }
        if self.columns.show_uv {
            row.push(format::uv(point.uv_index));
        }
        if self.columns.show_summary {
            row.push(Cell::plain(point.summary.clone().unwrap_or_default()));
        }

        row
    }

    fn temperature(&self, point: &ForecastPoint, granularity: Granularity) -> Cell {
        match (granularity, point.temperature_min, point.temperature_max) {
            (Granularity::Week, Some(min), Some(max)) => {
                format::temperature_range(min, max, self.units)
            }
            _ => point
                .temperature
                .map(|t| format::temperature(t, self.units))
                .unwrap_or_default(),
        }
    }
}
