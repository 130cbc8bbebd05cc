use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, Timelike};

use crate::model::{ComfortVerdict, HourlyForecast, HourlySample};

/// Comfort threshold in whole degrees Celsius. A floored night average below
/// this value predicts comfortable sleep; exactly this value does not.
pub const COMFORT_THRESHOLD_C: i32 = 20;

/// Which local hours count as "night".
///
/// An hour-of-day `h` is night when `h > after_hour || h < before_hour`.
/// With the defaults that is 21:00–23:59 and 00:00–06:59; the 20:xx hour
/// itself is still daytime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub after_hour: u32,
    pub before_hour: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self { after_hour: 20, before_hour: 7 }
    }
}

impl NightWindow {
    pub fn contains(&self, hour: u32) -> bool {
        hour > self.after_hour || hour < self.before_hour
    }
}

/// Derives a nighttime comfort verdict from an hourly temperature series.
///
/// Pure and stateless: the same samples always produce the same verdict, and
/// sample order does not matter.
#[derive(Debug, Clone)]
pub struct NightComfortEvaluator {
    offset: FixedOffset,
    window: NightWindow,
    threshold_c: i32,
}

impl NightComfortEvaluator {
    /// Build an evaluator for a location at the given UTC offset (seconds
    /// east of Greenwich, as reported by the forecast provider).
    pub fn new(utc_offset_seconds: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(utc_offset_seconds)
            .ok_or_else(|| anyhow!("Invalid UTC offset: {utc_offset_seconds} seconds"))?;

        Ok(Self { offset, window: NightWindow::default(), threshold_c: COMFORT_THRESHOLD_C })
    }

    /// Convenience constructor using the offset carried by the forecast.
    pub fn for_forecast(forecast: &HourlyForecast) -> Result<Self> {
        Self::new(forecast.utc_offset_seconds)
    }

    pub fn with_window(mut self, window: NightWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_threshold(mut self, threshold_c: i32) -> Self {
        self.threshold_c = threshold_c;
        self
    }

    /// Average the night-window samples and compare against the threshold.
    ///
    /// The mean is floored toward negative infinity to whole degrees before
    /// the comparison, so the verdict is consistent with the displayed
    /// integer. An empty night subset yields an unknown verdict rather than
    /// a division by zero.
    pub fn evaluate(&self, samples: &[HourlySample]) -> ComfortVerdict {
        let night: Vec<f64> = samples
            .iter()
            .filter(|s| self.local_hour(s.timestamp).is_some_and(|h| self.window.contains(h)))
            .map(|s| s.temperature_c)
            .collect();

        if night.is_empty() {
            return ComfortVerdict::unknown();
        }

        let mean = night.iter().sum::<f64>() / night.len() as f64;
        let floored = mean.floor() as i32;

        ComfortVerdict {
            average_night_temp_c: Some(floored),
            comfortable: floored < self.threshold_c,
        }
    }

    /// Hour-of-day at the queried location. Samples with timestamps outside
    /// the representable range are ignored.
    fn local_hour(&self, timestamp: i64) -> Option<u32> {
        DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&self.offset).hour())
    }
}
