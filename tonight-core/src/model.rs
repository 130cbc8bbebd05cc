use serde::{Deserialize, Serialize};

/// One hour of forecast data from the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Unix epoch seconds, UTC.
    pub timestamp: i64,
    pub temperature_c: f64,
}

/// Hourly series for a location, together with that location's UTC offset.
///
/// The offset comes from the provider so that "night" can be decided in the
/// queried city's local time rather than in UTC or the machine's time zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub utc_offset_seconds: i32,
    pub samples: Vec<HourlySample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A city name resolved to coordinates, as returned by a `CoordinateResolver`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Canonical name, e.g. "London" (may differ in case from the user input).
    pub name: String,
    pub coordinates: Coordinates,
}

/// The answer to "will I sleep tonight?".
///
/// `average_night_temp_c` is `None` when no forecast hour fell inside the
/// night window; callers must present that as "unknown", not as a verdict.
/// When it is `None`, `comfortable` is always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComfortVerdict {
    /// Mean night temperature floored to whole degrees Celsius.
    pub average_night_temp_c: Option<i32>,
    pub comfortable: bool,
}

impl ComfortVerdict {
    pub fn unknown() -> Self {
        Self { average_night_temp_c: None, comfortable: false }
    }

    /// True when the night window contained at least one sample.
    pub fn is_known(&self) -> bool {
        self.average_night_temp_c.is_some()
    }
}
