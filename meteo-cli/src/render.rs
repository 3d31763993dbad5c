//! Human-readable output for readings and errors.

use chrono::NaiveDateTime;
use meteo_core::{SearchError, WeatherReading, catalog::SupportedLocation};
use std::fmt::Write;

/// Coarse feel of a temperature, used to pick the headline wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Frigid,
    Freezing,
    Cold,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn from_celsius(t: f64) -> Self {
        if t <= -10.0 {
            TemperatureBand::Frigid
        } else if t <= 0.0 {
            TemperatureBand::Freezing
        } else if t <= 10.0 {
            TemperatureBand::Cold
        } else if t <= 20.0 {
            TemperatureBand::Mild
        } else if t <= 28.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBand::Frigid => "frigid",
            TemperatureBand::Freezing => "freezing",
            TemperatureBand::Cold => "cold",
            TemperatureBand::Mild => "mild",
            TemperatureBand::Warm => "warm",
            TemperatureBand::Hot => "hot",
        }
    }
}

pub fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.1}°C"),
        _ => "—".to_string(),
    }
}

/// Provider-local timestamps look like `2024-01-01T10:00`; anything else is
/// shown verbatim.
pub fn format_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn reading(r: &WeatherReading) -> String {
    let band = TemperatureBand::from_celsius(r.temperature);
    let mut out = String::new();

    let _ = writeln!(out, "{}", r.resolved_name);
    let _ = writeln!(out, "  Temperature:  {} ({})", format_temperature(Some(r.temperature)), band.label());
    let _ = writeln!(out, "  Feels like:   {}", format_temperature(Some(r.apparent_temperature)));
    let _ = writeln!(out, "  Wind:         {:.1} m/s", r.wind_speed);
    if !r.time.is_empty() {
        let _ = writeln!(out, "  Local time:   {}", format_time(&r.time));
    }
    let _ = writeln!(out, "  Coordinates:  {:.4}, {:.4}", r.latitude, r.longitude);
    let _ = write!(out, "  Search:       by {}", r.mode);

    out
}

/// Error message followed by an optional hint line.
pub fn failure(err: &SearchError) -> String {
    match err.hint() {
        Some(hint) => format!("{err}\nHint: {hint}"),
        None => err.to_string(),
    }
}

pub fn locations(list: &[SupportedLocation]) -> String {
    list.iter()
        .map(|loc| format!("{} ({}): {}", loc.country, loc.country_code, loc.cities.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
