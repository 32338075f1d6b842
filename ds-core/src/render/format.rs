//! Per-field formatting of forecast values into table cells.

use crossterm::style::Color;

use super::table::{Cell, fg};
use crate::{
    locale::Localization,
    model::{PrecipType, Units},
};

/// Percentages at or above this get a colored precipitation type.
pub const PRECIP_EMPHASIS: i64 = 25;

const WIND_ARROWS: [&str; 8] = ["↓", "↙", "←", "↖", "↑", "↗", "→", "↘"];

/// Round to the nearest half, then to a whole number, both half away from zero.
pub fn round_display(value: f64) -> i64 {
    ((value * 2.0).round() / 2.0).round() as i64
}

/// First band whose lower bound `value` reaches; `floor` when none does.
fn band<T: Copy>(value: f64, table: &[(f64, T)], floor: T) -> T {
    table
        .iter()
        .find(|(min, _)| value >= *min)
        .map_or(floor, |(_, band)| *band)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

const TEMPERATURE_BANDS: &[(f64, TemperatureBand)] = &[
    (30.0, TemperatureBand::Hot),
    (25.0, TemperatureBand::Warm),
    (15.0, TemperatureBand::Mild),
    (10.0, TemperatureBand::Cool),
];

impl TemperatureBand {
    /// Band of a Celsius temperature, after display rounding.
    pub fn of(celsius: f64) -> Self {
        band(
            round_display(celsius) as f64,
            TEMPERATURE_BANDS,
            TemperatureBand::Cold,
        )
    }

    pub fn color(&self) -> Color {
        match self {
            TemperatureBand::Cold => Color::Cyan,
            TemperatureBand::Cool => Color::Blue,
            TemperatureBand::Mild => Color::White,
            TemperatureBand::Warm => Color::Yellow,
            TemperatureBand::Hot => Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

const UV_BANDS: &[(f64, UvBand)] = &[
    (10.0, UvBand::Extreme),
    (7.0, UvBand::VeryHigh),
    (5.0, UvBand::High),
    (3.0, UvBand::Moderate),
];

impl UvBand {
    pub fn of(index: f64) -> Self {
        band(index, UV_BANDS, UvBand::Low)
    }

    pub fn color(&self) -> Color {
        let (r, g, b) = match self {
            UvBand::Low => (0x6b, 0xbf, 0x30),
            UvBand::Moderate => (0xff, 0xd2, 0x08),
            UvBand::High => (0xff, 0xae, 0x00),
            UvBand::VeryHigh => (0xea, 0x34, 0x47),
            UvBand::Extreme => (0xa4, 0x4c, 0x6f),
        };
        Color::Rgb { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureTrend {
    Rising,
    Falling,
    Steady,
}

impl PressureTrend {
    pub fn between(pressure: f64, previous: f64) -> Self {
        if pressure > previous {
            PressureTrend::Rising
        } else if pressure < previous {
            PressureTrend::Falling
        } else {
            PressureTrend::Steady
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            PressureTrend::Rising => "↑",
            PressureTrend::Falling => "↓",
            PressureTrend::Steady => "•",
        }
    }

    fn cell(&self) -> Cell {
        match self {
            PressureTrend::Rising => Cell::styled(self.marker(), fg(Color::Red)),
            PressureTrend::Falling => Cell::styled(self.marker(), fg(Color::Blue)),
            PressureTrend::Steady => Cell::plain(self.marker()),
        }
    }
}

/// Arrow pointing downwind for a bearing the wind blows from.
///
/// Sectors are 45° wide and centred on the eight principal directions;
/// anything within 22.5° of north, on either side of 0°, is north.
pub fn wind_arrow(bearing: f64) -> &'static str {
    let sector = ((bearing + 22.5).rem_euclid(360.0) / 45.0).floor() as usize;
    WIND_ARROWS[sector % WIND_ARROWS.len()]
}

fn precip_color(kind: PrecipType) -> Color {
    match kind {
        PrecipType::Rain => Color::Blue,
        PrecipType::Sleet => Color::Cyan,
        PrecipType::Snow => Color::White,
    }
}

pub fn temperature(value: f64, units: Units) -> Cell {
    let band = TemperatureBand::of(units.to_celsius(value));
    Cell::styled(
        format!("{}{}", round_display(value), units.temperature_label()),
        fg(band.color()),
    )
}

/// `min - max`, each end colored by its own band.
pub fn temperature_range(min: f64, max: f64, units: Units) -> Cell {
    let mut cell = temperature(min, units).plain_span(" - ");
    cell.spans.extend(temperature(max, units).spans);
    cell
}

pub fn precipitation(probability: f64, kind: Option<PrecipType>, locale: &Localization) -> Cell {
    if probability == 0.0 {
        return Cell::empty();
    }

    let percent = round_display(probability * 100.0);
    let cell = Cell::plain(format!("{percent:>2}%"));

    let Some(kind) = kind else {
        return cell;
    };
    let label = format!("({})", locale.precip_type(kind));
    if percent >= PRECIP_EMPHASIS {
        cell.plain_span(" ").styled_span(label, fg(precip_color(kind)))
    } else {
        cell.plain_span(format!(" {label}"))
    }
}

pub fn pressure(value: f64, previous: f64, units: Units) -> Cell {
    PressureTrend::between(value, previous)
        .cell()
        .plain_span(format!(" {} {}", round_display(value), units.pressure_label()))
}

pub fn wind(speed: f64, bearing: Option<f64>, units: Units) -> Cell {
    let reading = format!("{speed} {}", units.wind_label());
    match bearing {
        Some(bearing) => Cell::plain(format!("{} {reading}", wind_arrow(bearing))),
        None => Cell::plain(reading),
    }
}

pub fn clouds(cover: f64) -> Cell {
    Cell::plain(format!("{:>2}%", round_display(cover * 100.0)))
}

pub fn uv(index: f64) -> Cell {
    Cell::styled(index.to_string(), fg(UvBand::of(index).color()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;

    #[test]
    fn rounding_goes_through_halves() {
        assert_eq!(round_display(7.24), 7);
        assert_eq!(round_display(7.25), 8);
        assert_eq!(round_display(7.26), 8);
        assert_eq!(round_display(7.74), 8);
        assert_eq!(round_display(-2.2), -2);
        assert_eq!(round_display(-2.25), -3);
    }

    #[test]
    fn rounding_never_shows_negative_zero() {
        let cell = temperature(-0.2, Units::Si);
        assert_eq!(cell.text(), "0°C");
    }

    #[test]
    fn temperature_bands_follow_thresholds() {
        assert_eq!(TemperatureBand::of(-12.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(0.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(9.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(10.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::of(14.9), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::of(19.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::of(24.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::of(25.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(30.0), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::of(41.0), TemperatureBand::Hot);
    }

    #[test]
    fn fahrenheit_temperatures_are_banded_in_celsius() {
        let cell = temperature(86.0, Units::Us);
        assert_eq!(cell.text(), "86°F");
        assert_eq!(cell.spans[0].style.foreground_color, Some(Color::Red));
    }

    #[test]
    fn temperature_range_renders_min_and_max() {
        let cell = temperature_range(8.6, 16.2, Units::Si);
        assert_eq!(cell.text(), "9°C - 16°C");
        assert_eq!(cell.spans[0].style.foreground_color, Some(Color::Cyan));
        assert_eq!(cell.spans[2].style.foreground_color, Some(Color::White));
    }

    #[test]
    fn uv_bands_follow_thresholds() {
        assert_eq!(UvBand::of(0.0), UvBand::Low);
        assert_eq!(UvBand::of(2.0), UvBand::Low);
        assert_eq!(UvBand::of(3.0), UvBand::Moderate);
        assert_eq!(UvBand::of(4.0), UvBand::Moderate);
        assert_eq!(UvBand::of(5.0), UvBand::High);
        assert_eq!(UvBand::of(6.0), UvBand::High);
        assert_eq!(UvBand::of(7.0), UvBand::VeryHigh);
        assert_eq!(UvBand::of(9.0), UvBand::VeryHigh);
        assert_eq!(UvBand::of(10.0), UvBand::Extreme);
        assert_eq!(uv(6.0).text(), "6");
    }

    #[test]
    fn pressure_trend_compares_with_previous() {
        for (p, prev) in [(1013.0, 1012.9), (990.0, 1020.0), (1000.5, 1000.5)] {
            let expected = if p > prev {
                PressureTrend::Rising
            } else if p < prev {
                PressureTrend::Falling
            } else {
                PressureTrend::Steady
            };
            assert_eq!(PressureTrend::between(p, prev), expected);
        }

        assert_eq!(pressure(1013.2, 1012.0, Units::Si).text(), "↑ 1013 hPa");
        assert_eq!(pressure(1011.7, 1012.0, Units::Si).text(), "↓ 1012 hPa");
        assert_eq!(pressure(1012.0, 1012.0, Units::Si).text(), "• 1012 hPa");
        assert!(pressure(1012.0, 1012.0, Units::Si).spans[0].is_plain());
    }

    #[test]
    fn wind_arrows_for_principal_directions() {
        assert_eq!(wind_arrow(0.0), "↓");
        assert_eq!(wind_arrow(45.0), "↙");
        assert_eq!(wind_arrow(90.0), "←");
        assert_eq!(wind_arrow(135.0), "↖");
        assert_eq!(wind_arrow(180.0), "↑");
        assert_eq!(wind_arrow(225.0), "↗");
        assert_eq!(wind_arrow(270.0), "→");
        assert_eq!(wind_arrow(315.0), "↘");
    }

    #[test]
    fn wind_sector_edges_and_wraparound() {
        assert_eq!(wind_arrow(22.4), "↓");
        assert_eq!(wind_arrow(22.5), "↙");
        assert_eq!(wind_arrow(337.4), "↘");
        assert_eq!(wind_arrow(337.5), "↓");
        assert_eq!(wind_arrow(350.0), "↓");
        assert_eq!(wind_arrow(360.0), "↓");
    }

    #[test]
    fn every_bearing_resolves_to_one_arrow() {
        for tenth in 0..3600 {
            let arrow = wind_arrow(tenth as f64 / 10.0);
            assert!(WIND_ARROWS.contains(&arrow), "bearing {}", tenth as f64 / 10.0);
        }
    }

    #[test]
    fn wind_without_bearing_has_no_arrow() {
        assert_eq!(wind(3.47, Some(90.0), Units::Ca).text(), "← 3.47 km/h");
        assert_eq!(wind(0.0, None, Units::Si).text(), "0 m/s");
    }

    #[test]
    fn zero_precipitation_is_empty() {
        let en = Language::En.localization();
        assert_eq!(precipitation(0.0, Some(PrecipType::Rain), en).text(), "");
        assert!(precipitation(0.0, None, en).spans.is_empty());
    }

    #[test]
    fn likely_precipitation_is_emphasised() {
        let en = Language::En.localization();
        let cell = precipitation(0.30, Some(PrecipType::Rain), en);

        assert_eq!(cell.text(), "30% (Rain)");
        let type_span = cell.spans.last().expect("type span");
        assert_eq!(type_span.style.foreground_color, Some(Color::Blue));
    }

    #[test]
    fn unlikely_precipitation_is_plain_and_padded() {
        let tr = Language::Tr.localization();
        let cell = precipitation(0.05, Some(PrecipType::Snow), tr);

        assert_eq!(cell.text(), " 5% (Kar)");
        assert!(cell.spans.iter().all(|s| s.is_plain()));
    }

    #[test]
    fn emphasis_starts_at_threshold() {
        let en = Language::En.localization();
        let below = precipitation(0.24, Some(PrecipType::Sleet), en);
        let at = precipitation(0.25, Some(PrecipType::Sleet), en);

        assert!(below.spans.iter().all(|s| s.is_plain()));
        assert_eq!(
            at.spans.last().and_then(|s| s.style.foreground_color),
            Some(Color::Cyan)
        );
    }

    #[test]
    fn precipitation_without_type_shows_percentage_only() {
        let en = Language::En.localization();
        assert_eq!(precipitation(0.5, None, en).text(), "50%");
    }

    #[test]
    fn cloud_cover_is_padded_percentage() {
        assert_eq!(clouds(0.0).text(), " 0%");
        assert_eq!(clouds(0.07).text(), " 7%");
        assert_eq!(clouds(0.42).text(), "42%");
        assert_eq!(clouds(1.0).text(), "100%");
    }
}
