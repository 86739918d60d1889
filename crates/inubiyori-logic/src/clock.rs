//! Time compression: real seconds in, simulated days out.
//!
//! Timestamps are Unix seconds as `f64` so they survive a JSON round-trip
//! without losing sub-second precision.

use chrono::{DateTime, Local, Utc};

use crate::constants::DEFAULT_SECONDS_PER_DAY;
use crate::error::InputError;

/// Converts wall-clock deltas into simulated days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatClock {
    seconds_per_day: f64,
}

impl StatClock {
    pub fn new(seconds_per_day: f64) -> Result<Self, InputError> {
        if !seconds_per_day.is_finite() || seconds_per_day <= 0.0 {
            return Err(InputError::InvalidDayLength(seconds_per_day));
        }
        Ok(Self { seconds_per_day })
    }

    pub fn seconds_per_day(&self) -> f64 {
        self.seconds_per_day
    }

    /// Simulated days between two timestamps. Negative when `to` is earlier.
    pub fn elapsed_days(&self, from: f64, to: f64) -> f64 {
        (to - from) / self.seconds_per_day
    }

    /// Real seconds that cover `days` simulated days.
    pub fn days_to_seconds(&self, days: f64) -> f64 {
        days * self.seconds_per_day
    }
}

impl Default for StatClock {
    fn default() -> Self {
        Self {
            seconds_per_day: DEFAULT_SECONDS_PER_DAY,
        }
    }
}

/// Current wall-clock time as Unix seconds.
pub fn unix_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Render a Unix timestamp as local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: f64) -> String {
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9) as u32;
    let local = DateTime::<Utc>::from_timestamp(secs as i64, nanos)
        .map(|utc| utc.with_timezone(&Local))
        .unwrap_or_else(Local::now);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}
