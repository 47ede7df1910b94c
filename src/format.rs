//! Cell-level display formatting for weather observations.
//!
//! Everything in here is pure and total: absent input maps to an explicit
//! no-data marker, never to a panic or a `null`-ish literal.

use chrono::{DateTime, NaiveDateTime};
use ratatui::style::Color;

pub const NO_DATA: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionIcon {
    Sun,
    Cloud,
    Rain,
    Bolt,
    Snowflake,
    Fog,
    Wind,
}

impl ConditionIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            ConditionIcon::Sun => "☀",
            ConditionIcon::Cloud => "☁",
            ConditionIcon::Rain => "☂",
            ConditionIcon::Bolt => "⚡",
            ConditionIcon::Snowflake => "❄",
            ConditionIcon::Fog => "≈",
            ConditionIcon::Wind => "»",
        }
    }
}

/// Pick an icon by case-insensitive keyword match. First matching group
/// wins, so the check order is load-bearing: "Partly Cloudy" stops at the
/// cloud group, "Light Rain Showers" falls through to rain.
pub fn condition_icon(condition: &str) -> ConditionIcon {
    let lower = condition.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has(&["clear", "sunny"]) {
        ConditionIcon::Sun
    } else if has(&["cloud"]) {
        ConditionIcon::Cloud
    } else if has(&["rain", "drizzle"]) {
        ConditionIcon::Rain
    } else if has(&["storm", "thunder"]) {
        ConditionIcon::Bolt
    } else if has(&["snow"]) {
        ConditionIcon::Snowflake
    } else if has(&["fog", "mist"]) {
        ConditionIcon::Fog
    } else if has(&["wind"]) {
        ConditionIcon::Wind
    } else {
        ConditionIcon::Cloud
    }
}

/// Trend icon category for a temperature cell. 15 and 25 both count as
/// medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempTrend {
    High,
    Low,
    Medium,
}

impl TempTrend {
    pub fn glyph(self) -> &'static str {
        match self {
            TempTrend::High => "▲",
            TempTrend::Low => "▼",
            TempTrend::Medium => "•",
        }
    }
}

pub fn temp_trend(celsius: f64) -> TempTrend {
    if celsius > 25.0 {
        TempTrend::High
    } else if celsius < 15.0 {
        TempTrend::Low
    } else {
        TempTrend::Medium
    }
}

/// Color band for a temperature cell, inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBand {
    Hot,
    Warm,
    Mild,
    Cool,
    Cold,
}

impl TempBand {
    pub fn color(self) -> Color {
        match self {
            TempBand::Hot => Color::Rgb(0xef, 0x44, 0x44),
            TempBand::Warm => Color::Rgb(0xf5, 0x9e, 0x0b),
            TempBand::Mild => Color::Rgb(0x10, 0xb9, 0x81),
            TempBand::Cool => Color::Rgb(0x3b, 0x82, 0xf6),
            TempBand::Cold => Color::Rgb(0x63, 0x66, 0xf1),
        }
    }
}

pub fn temp_band(celsius: f64) -> TempBand {
    if celsius >= 35.0 {
        TempBand::Hot
    } else if celsius >= 25.0 {
        TempBand::Warm
    } else if celsius >= 15.0 {
        TempBand::Mild
    } else if celsius >= 5.0 {
        TempBand::Cool
    } else {
        TempBand::Cold
    }
}

pub fn temperature_text(temp: Option<f64>) -> String {
    match temp {
        Some(t) => format!("{t}°C"),
        None => NO_DATA.to_string(),
    }
}

pub fn humidity_text(humidity: Option<f64>) -> String {
    match humidity {
        Some(h) => format!("{h}%"),
        None => NO_DATA.to_string(),
    }
}

pub fn pressure_text(pressure: Option<f64>) -> String {
    match pressure {
        Some(p) => format!("{p} mB"),
        None => NO_DATA.to_string(),
    }
}

/// Timestamps arrive as strings in whatever shape the data source emits.
/// RFC 3339 and RFC 2822 cover the JSON-serialized forms, the plain
/// `Y-m-d H:M:S` forms cover the raw column text.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}

/// Absent timestamps and unparseable timestamps stay textually distinct.
pub fn format_date(timestamp: Option<&str>) -> String {
    match timestamp {
        None => NO_DATA.to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(dt) => dt.format("%-d %b %Y").to_string(),
            None => "Invalid Date".to_string(),
        },
    }
}

pub fn format_time(timestamp: Option<&str>) -> String {
    match timestamp {
        None => NO_DATA.to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => "Invalid Time".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_keyword_precedence() {
        assert_eq!(condition_icon("Clear"), ConditionIcon::Sun);
        assert_eq!(condition_icon("Partly Cloudy"), ConditionIcon::Cloud);
        assert_eq!(condition_icon("Light Rain Showers"), ConditionIcon::Rain);
        assert_eq!(condition_icon("Thunderstorm"), ConditionIcon::Bolt);
        assert_eq!(condition_icon("Light Snow"), ConditionIcon::Snowflake);
        assert_eq!(condition_icon("Shallow Fog"), ConditionIcon::Fog);
        assert_eq!(condition_icon("Widespread Dust"), ConditionIcon::Cloud);
    }

    #[test]
    fn cloudy_rain_mix_prefers_cloud() {
        // "cloud" is checked before "rain", matching the source data's
        // compound descriptions.
        assert_eq!(condition_icon("Rain Clouds"), ConditionIcon::Cloud);
    }

    #[test]
    fn trend_boundaries_are_medium() {
        assert_eq!(temp_trend(25.0), TempTrend::Medium);
        assert_eq!(temp_trend(15.0), TempTrend::Medium);
        assert_eq!(temp_trend(25.1), TempTrend::High);
        assert_eq!(temp_trend(14.9), TempTrend::Low);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(temp_band(35.0), TempBand::Hot);
        assert_eq!(temp_band(34.9), TempBand::Warm);
        assert_eq!(temp_band(25.0), TempBand::Warm);
        assert_eq!(temp_band(24.9), TempBand::Mild);
        assert_eq!(temp_band(15.0), TempBand::Mild);
        assert_eq!(temp_band(14.9), TempBand::Cool);
        assert_eq!(temp_band(5.0), TempBand::Cool);
        assert_eq!(temp_band(4.9), TempBand::Cold);
    }

    #[test]
    fn absent_values_render_no_data() {
        assert_eq!(temperature_text(None), "N/A");
        assert_eq!(humidity_text(None), "N/A");
        assert_eq!(pressure_text(None), "N/A");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_time(None), "N/A");
    }

    #[test]
    fn present_values_carry_units() {
        assert_eq!(temperature_text(Some(30.0)), "30°C");
        assert_eq!(temperature_text(Some(30.5)), "30.5°C");
        assert_eq!(humidity_text(Some(27.0)), "27%");
        assert_eq!(pressure_text(Some(1010.0)), "1010 mB");
    }

    #[test]
    fn timestamp_forms_parse() {
        assert_eq!(format_date(Some("1996-11-01 11:00:00")), "1 Nov 1996");
        assert_eq!(format_time(Some("1996-11-01 11:00:00")), "11:00");
        assert_eq!(
            format_date(Some("Fri, 01 Nov 1996 11:00:00 GMT")),
            "1 Nov 1996"
        );
        assert_eq!(format_date(Some("1996-11-01T11:00:00+00:00")), "1 Nov 1996");
    }

    #[test]
    fn invalid_and_absent_stay_distinct() {
        assert_eq!(format_date(Some("not a date")), "Invalid Date");
        assert_eq!(format_time(Some("not a date")), "Invalid Time");
        assert_ne!(format_date(Some("not a date")), format_date(None));
        assert_ne!(format_time(Some("not a date")), format_time(None));
    }
}
