//! Dynamic daylight model.
//!
//! Day length eases between the shortest day at the winter solstice and the
//! longest day at the summer solstice along a half cosine, and sunrise and
//! sunset sit symmetrically around midday.

use std::f64::consts::PI;

use serde::Serialize;

use crate::accounting::{day_of_year, days_in_year};
use crate::config::CalendarConfig;
use crate::TimeComponents;

/// Sun times for one day, in fractional hours from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaylightTimes {
    pub daylight_hours: f64,
    pub sunrise:        f64,
    pub sunset:         f64,
    pub solar_midday:   f64,
    /// May exceed `hoursPerDay`; it lies in the night after `sunset`
    pub solar_midnight: f64,
}

/// Hours of daylight on the day of `components`
pub fn daylight_hours(config: &CalendarConfig, components: &TimeComponents) -> f64 {
    let hours_per_day = f64::from(config.days.hours_per_day);
    let Some(daylight) = config.daylight.filter(|d| d.enabled) else {
        return hours_per_day / 2.0;
    };

    let display_year = config.display_year(components);
    let year_length = match days_in_year(config, display_year) {
        0 => config.days.days_per_year.max(1),
        n => n,
    };
    let doy = day_of_year(config, components) % year_length;
    let winter = daylight.winter_solstice % year_length;
    let summer = daylight.summer_solstice % year_length;

    let days_since_winter = (doy + year_length - winter) % year_length;
    let days_between = (summer + year_length - winter) % year_length;

    let progress = if days_since_winter <= days_between {
        if days_between == 0 {
            0.0
        } else {
            f64::from(days_since_winter) / f64::from(days_between)
        }
    } else {
        let falling = year_length - days_between;
        1.0 - f64::from(days_since_winter - days_between) / f64::from(falling)
    };

    let eased = (1.0 - (progress * PI).cos()) / 2.0;
    daylight.shortest_day + (daylight.longest_day - daylight.shortest_day) * eased
}

/// Sunrise, sunset and solar midpoints on the day of `components`
pub fn daylight_times(config: &CalendarConfig, components: &TimeComponents) -> DaylightTimes {
    let hours_per_day = f64::from(config.days.hours_per_day);
    let daylight_hours = daylight_hours(config, components);
    let midday = hours_per_day / 2.0;
    let sunrise = midday - daylight_hours / 2.0;
    let sunset = midday + daylight_hours / 2.0;

    DaylightTimes {
        daylight_hours,
        sunrise,
        sunset,
        solar_midday: (sunrise + sunset) / 2.0,
        solar_midnight: sunset + (hours_per_day - daylight_hours) / 2.0,
    }
}

pub fn sunrise(config: &CalendarConfig, components: &TimeComponents) -> f64 {
    daylight_times(config, components).sunrise
}

pub fn sunset(config: &CalendarConfig, components: &TimeComponents) -> f64 {
    daylight_times(config, components).sunset
}

fn current_hour(config: &CalendarConfig, components: &TimeComponents) -> f64 {
    components.fractional_hour(config.days.minutes_per_hour, config.days.seconds_per_minute)
}

/// Whether the sun is up at `components`
pub fn is_daytime(config: &CalendarConfig, components: &TimeComponents) -> bool {
    let times = daylight_times(config, components);
    let hour = current_hour(config, components);
    times.sunrise <= hour && hour < times.sunset
}

/// Position within the daylight span, clamped to `[0, 1]`
pub fn progress_day(config: &CalendarConfig, components: &TimeComponents) -> f64 {
    let times = daylight_times(config, components);
    if times.daylight_hours <= 0.0 {
        return 0.0;
    }
    ((current_hour(config, components) - times.sunrise) / times.daylight_hours).clamp(0.0, 1.0)
}

/// Position within the night, clamped to `[0, 1]`.
///
/// Hours before sunrise are counted as the tail of the previous evening's
/// night, so the night runs from sunset through midnight to sunrise.
pub fn progress_night(config: &CalendarConfig, components: &TimeComponents) -> f64 {
    let times = daylight_times(config, components);
    let hours_per_day = f64::from(config.days.hours_per_day);
    let night_hours = hours_per_day - times.daylight_hours;
    if night_hours <= 0.0 {
        return 0.0;
    }

    let mut hour = current_hour(config, components);
    if hour < times.sunrise {
        hour += hours_per_day;
    }
    ((hour - times.sunset) / night_hours).clamp(0.0, 1.0)
}
