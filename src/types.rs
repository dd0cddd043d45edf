use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A broken-down moment on a configured calendar.
///
/// Produced and consumed by the external [`TimeAuthority`](crate::TimeAuthority).
/// `year` is the internal, zero-based year; add `years.yearZero` to get the
/// year users see. Month and day are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[display(
    fmt = "{}-{:02}-{:02} {:02}:{:02}:{:02}",
    year,
    "month + 1",
    "day_of_month + 1",
    hour,
    minute,
    second
)]
#[serde(rename_all = "camelCase")]
pub struct TimeComponents {
    pub year:         i64,
    pub month:        usize,
    pub day_of_month: u32,
    #[serde(default)]
    pub hour:         u32,
    #[serde(default)]
    pub minute:       u32,
    #[serde(default)]
    pub second:       u32,
}

impl TimeComponents {
    /// Creates components at midnight of the given date
    pub const fn date(year: i64, month: usize, day_of_month: u32) -> Self {
        Self {
            year,
            month,
            day_of_month,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Returns a copy with the time of day replaced
    #[must_use]
    pub const fn at(self, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    /// Year as presented to users
    #[inline]
    pub const fn display_year(&self, year_zero: i64) -> i64 {
        self.year + year_zero
    }

    /// 1-indexed month number
    #[inline]
    pub const fn month_number(&self) -> usize {
        self.month + 1
    }

    /// 1-indexed day of month
    #[inline]
    pub const fn day_number(&self) -> u32 {
        self.day_of_month + 1
    }

    /// Time of day as fractional hours, given the calendar's minute and second units
    pub fn fractional_hour(&self, minutes_per_hour: u32, seconds_per_minute: u32) -> f64 {
        let mph = f64::from(minutes_per_hour.max(1));
        let spm = f64::from(seconds_per_minute.max(1));
        f64::from(self.hour) + f64::from(self.minute) / mph + f64::from(self.second) / (mph * spm)
    }
}

/// Source of truth for world time ↔ calendar component conversion.
///
/// Implementations must round-trip every value they produce and use the same
/// month/day accounting as [`days_in_month`](crate::days_in_month).
pub trait TimeAuthority {
    /// Converts components to absolute world time in seconds
    fn components_to_time(&self, components: &TimeComponents) -> i64;

    /// Converts absolute world time in seconds to components
    fn time_to_components(&self, world_time: i64) -> TimeComponents;
}

impl<T: TimeAuthority + ?Sized> TimeAuthority for &T {
    fn components_to_time(&self, components: &TimeComponents) -> i64 {
        (**self).components_to_time(components)
    }

    fn time_to_components(&self, world_time: i64) -> TimeComponents {
        (**self).time_to_components(world_time)
    }
}
