use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels a locally generated forecast can carry, coldest first.
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

const CELSIUS_PER_FAHRENHEIT_DEGREE: f64 = 0.5556;
const KELVIN_OFFSET: f64 = 273.15;

/// One day's weather.
///
/// Fahrenheit is never stored: it is derived from `temperature_c` on every read,
/// and recomputed (not trusted) when a forecast is parsed from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ForecastWire", try_from = "ForecastWire")]
pub struct Forecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: String,
}

impl Forecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: impl Into<String>) -> Self {
        Self { date, temperature_c, summary: summary.into() }
    }

    /// `32 + trunc(C / 0.5556)`.
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / CELSIUS_PER_FAHRENHEIT_DEGREE) as i32
    }

    /// Ratio of the Kelvin offset to the (non-negative) Celsius temperature.
    ///
    /// Temperatures below zero are clamped to zero first; the ratio is undefined
    /// for zero, which is reported as `None`.
    pub fn kelvin_factor(&self) -> Option<f64> {
        let clamped = self.temperature_c.max(0);
        if clamped == 0 {
            return None;
        }
        Some(KELVIN_OFFSET / f64::from(clamped))
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}°C ({}°F) {}",
            self.date.format("%A %Y-%m-%d"),
            self.temperature_c,
            self.temperature_f(),
            self.summary,
        )
    }
}

/// JSON shape shared by the server and the remote provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastWire {
    date: String,
    temperature_c: i32,
    #[serde(default)]
    temperature_f: Option<i32>,
    summary: String,
}

impl From<Forecast> for ForecastWire {
    fn from(forecast: Forecast) -> Self {
        Self {
            date: forecast.date.format("%Y-%m-%d").to_string(),
            temperature_c: forecast.temperature_c,
            temperature_f: Some(forecast.temperature_f()),
            summary: forecast.summary,
        }
    }
}

impl TryFrom<ForecastWire> for Forecast {
    type Error = String;

    fn try_from(wire: ForecastWire) -> Result<Self, Self::Error> {
        let date = parse_wire_date(&wire.date)
            .ok_or_else(|| format!("invalid forecast date '{}'", wire.date))?;

        Ok(Forecast { date, temperature_c: wire.temperature_c, summary: wire.summary })
    }
}

/// Accepts a plain ISO-8601 date, or a date-time (with or without offset) whose
/// calendar date is kept as-is.
fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|dt| dt.date())
}
