//! Clock time value: hours/minutes/seconds with field-wise adjustment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for the hours field.
pub const MAX_HOURS: u32 = 99;
/// Upper bound for the minutes field.
pub const MAX_MINUTES: u32 = 59;
/// Upper bound for the seconds field.
pub const MAX_SECONDS: u32 = 59;

/// A countdown duration split into display fields.
///
/// Each field stays within its display range (`00-99` hours, `00-59`
/// minutes/seconds), so a `Time` is always renderable as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// Which field of a [`Time`] an adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

/// Direction of a single-step field adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Increment,
    Decrement,
}

impl Time {
    /// All fields zero.
    pub const ZERO: Time = Time {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build a time, clamping each field to its display range.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Time {
            hours: hours.min(MAX_HOURS),
            minutes: minutes.min(MAX_MINUTES),
            seconds: seconds.min(MAX_SECONDS),
        }
    }

    /// Convert a total second count into display fields.
    ///
    /// Values past the displayable maximum saturate at `99:59:59`.
    pub fn from_seconds(total: u64) -> Self {
        const MAX_TOTAL: u64 =
            (MAX_HOURS as u64) * 3600 + (MAX_MINUTES as u64) * 60 + MAX_SECONDS as u64;
        let total = total.min(MAX_TOTAL);
        Time {
            hours: (total / 3600) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    /// Whole-minute constructor used by duration presets.
    pub fn from_minutes(minutes: u32) -> Self {
        Time::from_seconds(minutes as u64 * 60)
    }

    /// Total seconds represented by this time.
    pub fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Subtract one second, borrowing across fields. Saturates at zero.
    pub fn tick_down(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = MAX_SECONDS;
        } else if self.hours > 0 {
            self.hours -= 1;
            self.minutes = MAX_MINUTES;
            self.seconds = MAX_SECONDS;
        }
    }

    /// Step one field up or down, wrapping at its range boundary.
    ///
    /// Fields are independent here: decrementing minutes at zero wraps
    /// to 59 without touching hours.
    pub fn adjust(&mut self, field: TimeField, direction: AdjustDirection) {
        let (value, max) = match field {
            TimeField::Hours => (&mut self.hours, MAX_HOURS),
            TimeField::Minutes => (&mut self.minutes, MAX_MINUTES),
            TimeField::Seconds => (&mut self.seconds, MAX_SECONDS),
        };
        *value = match direction {
            AdjustDirection::Increment => {
                if *value >= max {
                    0
                } else {
                    *value + 1
                }
            }
            AdjustDirection::Decrement => {
                if *value == 0 {
                    max
                } else {
                    *value - 1
                }
            }
        };
    }
}

impl Default for Time {
    fn default() -> Self {
        Time::ZERO
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}
