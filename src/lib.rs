//! Derived calendrical facts for configurable fantasy calendars.
//!
//! Given a [`CalendarConfig`] and a broken-down moment ([`TimeComponents`]),
//! this crate answers what the calendar says about that moment: leap years,
//! month lengths, weekday, moon phases, season, era, canonical hour, named
//! week, repeating cycles, daylight, festivals, and formatted strings.
//!
//! Every resolver is a pure function of its inputs. Converting between
//! absolute world time and components belongs to an external
//! [`TimeAuthority`]; [`CalendarEngine`] pairs one with a config, and
//! [`CalendarTracker`] reports transitions between successive world times.
//!
//! Resolvers degrade instead of failing on malformed definitions: a bad leap
//! pattern means no leap years, an invalid moon cycle yields its first phase,
//! and so on. Use [`CalendarConfig::validate`] to reject such input up front.

mod accounting;
mod approx;
mod canonical;
mod config;
mod consts;
mod cycle;
mod daylight;
mod engine;
mod era;
mod festival;
mod format;
mod leap;
mod moon;
mod prelude;
mod range;
mod season;
mod tracker;
mod types;
mod week;

#[cfg(test)]
mod test_utils;

pub use accounting::{day_of_year, days_before_month, days_in_month, days_in_year, epoch_day};
pub use approx::{ApproxTime, SeasonStage, approx_date, approx_time};
pub use canonical::canonical_hour;
pub use config::{
    CalendarConfig, CanonicalHour, ConfigError, Cycle, CycleBasis, CycleEntry, DayUnits, DaylightConfig, Era,
    EraFormat, Festival, LeapRuleKind, LeapYearConfig, MonthConfig, MoonConfig, MoonPhaseConfig, ReferenceDate,
    Season, SimpleLeapYear, WeekKind, WeekName, WeekdayConfig, WeeksConfig, YearsConfig,
};
pub use consts::*;
pub use cycle::{CycleValue, CycleValues, cycle_index, cycle_values, epoch_value};
pub use daylight::{
    DaylightTimes, daylight_hours, daylight_times, is_daytime, progress_day, progress_night, sunrise, sunset,
};
pub use engine::CalendarEngine;
pub use era::{EraInfo, current_era, format_year_with_era};
pub use festival::{count_non_weekday_festivals_before, festivals_in_month, find_festival_day, weekday};
pub use format::{DEFAULT_DATE_FORMAT, FormatOptions, format_date, format_date_with, format_named, ordinal, roman_numeral};
pub use leap::{LeapPattern, LeapPatternError, LeapRule, PatternToken, is_leap_year};
pub use moon::{MoonPhaseInfo, moon_phase, moon_phases, phase_day_distribution};
pub use range::WrappingRange;
pub use season::{current_season, current_season_index, season_progress, season_range};
pub use tracker::{CalendarEvent, CalendarTracker};
pub use types::{TimeAuthority, TimeComponents};
pub use week::{WeekInfo, current_week};
