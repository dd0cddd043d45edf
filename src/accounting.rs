//! Day and month accounting.
//!
//! Every day-of-year computation in the crate goes through this module so
//! month lengths come from one leap-aware source.

use crate::config::CalendarConfig;
use crate::leap::{LeapRule, is_leap_year};
use crate::TimeComponents;

/// Length of month `month_index` (0-indexed) in `display_year`, or 0 if out of range
pub fn days_in_month(config: &CalendarConfig, month_index: usize, display_year: i64) -> u32 {
    let leap = is_leap_year(config, display_year);
    month_length(config, month_index, leap)
}

/// Sum of every month's length in `display_year`
pub fn days_in_year(config: &CalendarConfig, display_year: i64) -> u32 {
    let leap = is_leap_year(config, display_year);
    year_length(config, leap)
}

fn month_length(config: &CalendarConfig, month_index: usize, leap: bool) -> u32 {
    config.months.get(month_index).map_or(0, |month| match month.leap_days {
        Some(leap_days) if leap => leap_days,
        _ => month.days,
    })
}

fn year_length(config: &CalendarConfig, leap: bool) -> u32 {
    (0..config.months.len())
        .map(|idx| month_length(config, idx, leap))
        .sum()
}

/// Days before the first day of `month_index` in `display_year`
pub fn days_before_month(config: &CalendarConfig, month_index: usize, display_year: i64) -> u32 {
    let leap = is_leap_year(config, display_year);
    (0..month_index.min(config.months.len()))
        .map(|idx| month_length(config, idx, leap))
        .sum()
}

/// 0-indexed day of year for `components`
pub fn day_of_year(config: &CalendarConfig, components: &TimeComponents) -> u32 {
    let display_year = config.display_year(components);
    days_before_month(config, components.month, display_year) + components.day_of_month
}

/// Leap-aware day count since the first day of internal year 0.
///
/// Negative for dates before that epoch.
pub fn epoch_day(config: &CalendarConfig, components: &TimeComponents) -> i64 {
    let rule = LeapRule::from_config(config);
    let common = i64::from(year_length(config, false));
    let leap = i64::from(year_length(config, true));
    let year_zero = config.year_zero();
    let whole_years = rule.total_over_years(year_zero, year_zero.saturating_add(components.year), common, leap);

    whole_years + i64::from(day_of_year(config, components))
}

/// Day count used by the moon engine: raw month `days` with no leap substitution.
///
/// Moon phases follow this count rather than [`epoch_day`], even across
/// leap years.
pub(crate) fn raw_day_count(config: &CalendarConfig, display_year: i64, month: usize, day: u32) -> i64 {
    let raw_year: i64 = config.months.iter().map(|m| i64::from(m.days)).sum();
    let raw_before: i64 = config
        .months
        .iter()
        .take(month)
        .map(|m| i64::from(m.days))
        .sum();
    display_year * raw_year + raw_before + i64::from(day)
}
