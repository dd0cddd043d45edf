//! Calendar definition schema.
//!
//! A [`CalendarConfig`] is authored elsewhere (settings forms, importers) and
//! handed whole to every resolver. Field names follow the camelCase JSON the
//! importers emit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DAYS_PER_YEAR, DEFAULT_HOURS_PER_DAY, DEFAULT_MINUTES_PER_HOUR,
    DEFAULT_SECONDS_PER_MINUTE, DEFAULT_WEEK_LENGTH, PHASE_BOUND_TOLERANCE,
};
use crate::leap::{LeapPattern, LeapPatternError};
use crate::prelude::*;
use crate::TimeComponents;

/// Error type for loading and validating a calendar definition.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed into the schema.
    #[error("Invalid calendar JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The calendar declares no months.
    #[error("Calendar must declare at least one month")]
    NoMonths,

    /// A month has zero days.
    #[error("Month {name:?} must have at least one day")]
    EmptyMonth { name: String },

    /// Hours, minutes or seconds per unit is zero.
    #[error("Day units must be non-zero: {field}")]
    ZeroDayUnit { field: &'static str },

    /// Leap rule `simple` without a positive interval.
    #[error("Leap rule 'simple' requires a positive interval")]
    MissingLeapInterval,

    /// Leap rule `pattern` with an unparseable pattern.
    #[error(transparent)]
    LeapPattern(#[from] LeapPatternError),

    /// Festival pointing at a month or day that does not exist.
    #[error("Festival {name:?} falls on nonexistent date {month}/{day}")]
    FestivalOutOfRange { name: String, month: usize, day: u32 },

    /// Moon cycle length is zero, negative, or not finite.
    #[error("Moon {name:?} has invalid cycle length {length}")]
    InvalidMoonCycle { name: String, length: f64 },

    /// Moon declares no phases.
    #[error("Moon {name:?} has no phases")]
    NoMoonPhases { name: String },

    /// Moon phases do not cover `[0, 1)` end to end in order.
    #[error("Moon {moon:?} phase {phase:?} leaves a gap, overlaps, or runs past [0, 1)")]
    PhaseOrder { moon: String, phase: String },

    /// Season bounds refer to a nonexistent month.
    #[error("Season {name:?} references month outside 1..={months}")]
    SeasonMonthOutOfRange { name: String, months: usize },

    /// Cycle with zero length or no entries.
    #[error("Cycle {name:?} must have length >= 1 and at least one entry")]
    EmptyCycle { name: String },
}

/// Root calendar definition, treated as an immutable snapshot per call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    #[serde(default)]
    pub name:              String,
    pub months:            Vec<MonthConfig>,
    #[serde(default)]
    pub weekdays:          Vec<WeekdayConfig>,
    #[serde(default)]
    pub years:             YearsConfig,
    #[serde(default)]
    pub leap_year_config:  Option<LeapYearConfig>,
    #[serde(default)]
    pub festivals:         Vec<Festival>,
    #[serde(default)]
    pub moons:             Vec<MoonConfig>,
    #[serde(default)]
    pub seasons:           Vec<Season>,
    #[serde(default)]
    pub eras:              Vec<Era>,
    #[serde(default)]
    pub cycles:            Vec<Cycle>,
    #[serde(default)]
    pub cycle_format:      Option<String>,
    #[serde(default)]
    pub canonical_hours:   Vec<CanonicalHour>,
    #[serde(default)]
    pub weeks:             Option<WeeksConfig>,
    #[serde(default)]
    pub daylight:          Option<DaylightConfig>,
    #[serde(default)]
    pub days:              DayUnits,
    #[serde(default)]
    pub date_formats:      BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthConfig {
    pub name:             String,
    #[serde(default)]
    pub abbreviation:     Option<String>,
    #[serde(default)]
    pub ordinal:          u32,
    pub days:             u32,
    #[serde(default)]
    pub leap_days:        Option<u32>,
    #[serde(default)]
    pub starting_weekday: Option<usize>,
}

impl MonthConfig {
    /// Abbreviation, or the full name when none is configured
    pub fn short_name(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayConfig {
    pub name:         String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl WeekdayConfig {
    /// Abbreviation, or the full name when none is configured
    pub fn short_name(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearsConfig {
    #[serde(default)]
    pub year_zero:     i64,
    #[serde(default)]
    pub first_weekday: usize,
    #[serde(default)]
    pub leap_year:     Option<SimpleLeapYear>,
}

/// Legacy every-N-years leap rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleLeapYear {
    pub interval: i64,
    #[serde(default)]
    pub start:    i64,
}

/// Which leap rule a [`LeapYearConfig`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum LeapRuleKind {
    #[default]
    #[display(fmt = "none")]
    None,
    #[display(fmt = "simple")]
    Simple,
    #[display(fmt = "gregorian")]
    Gregorian,
    #[display(fmt = "pattern")]
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeapYearConfig {
    #[serde(default)]
    pub rule:     LeapRuleKind,
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub start:    Option<i64>,
    #[serde(default)]
    pub pattern:  Option<String>,
}

/// A named day pinned to a month and day, possibly outside the weekday cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    pub name:               String,
    /// 1-indexed month
    pub month:              usize,
    /// 1-indexed day of month
    pub day:                u32,
    #[serde(default)]
    pub leap_year_only:     bool,
    #[serde(default = "default_true")]
    pub counts_for_weekday: bool,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonConfig {
    pub name:             String,
    pub cycle_length:     f64,
    #[serde(default)]
    pub cycle_day_adjust: f64,
    pub phases:           Vec<MoonPhaseConfig>,
    #[serde(default)]
    pub reference_date:   ReferenceDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseConfig {
    pub name:   String,
    #[serde(default)]
    pub rising: Option<String>,
    #[serde(default)]
    pub fading: Option<String>,
    #[serde(default)]
    pub icon:   Option<String>,
    #[serde(default)]
    pub start:  f64,
    #[serde(default)]
    pub end:    f64,
}

/// A known new-moon date. `year` is a display year; month and day are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDate {
    pub year:  i64,
    pub month: usize,
    pub day:   u32,
}

/// A season, bounded either by months (1-indexed, with optional 1-indexed
/// day-of-month bounds) or by 0-indexed day-of-year.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub name:         String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub month_start:  Option<usize>,
    #[serde(default)]
    pub month_end:    Option<usize>,
    #[serde(default)]
    pub day_start:    Option<u32>,
    #[serde(default)]
    pub day_end:      Option<u32>,
}

impl Season {
    /// Abbreviation, or the full name when none is configured
    pub fn short_name(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }

    /// Both month bounds, when this season is month-based
    pub const fn month_bounds(&self) -> Option<(usize, usize)> {
        match (self.month_start, self.month_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// How an era abbreviation is attached to the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum EraFormat {
    #[display(fmt = "prefix")]
    Prefix,
    #[default]
    #[display(fmt = "suffix")]
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Era {
    pub name:         String,
    pub abbreviation: String,
    pub start_year:   i64,
    #[serde(default)]
    pub end_year:     Option<i64>,
    #[serde(default)]
    pub format:       EraFormat,
    #[serde(default)]
    pub template:     Option<String>,
}

/// Epoch value a repeating cycle indexes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum CycleBasis {
    #[default]
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "eraYear")]
    EraYear,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "monthDay")]
    MonthDay,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "yearDay")]
    YearDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub name:     String,
    pub length:   i64,
    #[serde(default)]
    pub offset:   i64,
    #[serde(default)]
    pub based_on: CycleBasis,
    pub entries:  Vec<CycleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CycleEntry {
    pub name: String,
}

/// A named period of the day; wraps midnight when `start_hour > end_hour`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHour {
    pub name:         String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    pub start_hour:   u32,
    pub end_hour:     u32,
}

impl CanonicalHour {
    /// Abbreviation, or the full name when none is configured
    pub fn short_name(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }
}

/// Whether named weeks restart each month or run through the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum WeekKind {
    #[default]
    #[display(fmt = "month-based")]
    MonthBased,
    #[display(fmt = "year-based")]
    YearBased,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeksConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, rename = "type")]
    pub kind:    WeekKind,
    #[serde(default)]
    pub names:   Vec<WeekName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekName {
    pub name:         String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaylightConfig {
    #[serde(default)]
    pub enabled:         bool,
    pub shortest_day:    f64,
    pub longest_day:     f64,
    pub winter_solstice: u32,
    pub summer_solstice: u32,
}

/// Units that subdivide a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayUnits {
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day:      u32,
    #[serde(default = "default_minutes_per_hour")]
    pub minutes_per_hour:   u32,
    #[serde(default = "default_seconds_per_minute")]
    pub seconds_per_minute: u32,
    #[serde(default = "default_days_per_year")]
    pub days_per_year:      u32,
}

const fn default_hours_per_day() -> u32 {
    DEFAULT_HOURS_PER_DAY
}

const fn default_minutes_per_hour() -> u32 {
    DEFAULT_MINUTES_PER_HOUR
}

const fn default_seconds_per_minute() -> u32 {
    DEFAULT_SECONDS_PER_MINUTE
}

const fn default_days_per_year() -> u32 {
    DEFAULT_DAYS_PER_YEAR
}

impl Default for DayUnits {
    fn default() -> Self {
        Self {
            hours_per_day:      DEFAULT_HOURS_PER_DAY,
            minutes_per_hour:   DEFAULT_MINUTES_PER_HOUR,
            seconds_per_minute: DEFAULT_SECONDS_PER_MINUTE,
            days_per_year:      DEFAULT_DAYS_PER_YEAR,
        }
    }
}

impl DayUnits {
    /// Seconds in one calendar day
    pub const fn seconds_per_day(&self) -> i64 {
        self.hours_per_day as i64 * self.minutes_per_hour as i64 * self.seconds_per_minute as i64
    }
}

impl CalendarConfig {
    /// Parses a calendar from JSON and validates it.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` on malformed input, or the first
    /// validation failure reported by [`CalendarConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the structural invariants resolvers rely on.
    ///
    /// Resolvers still degrade gracefully on configs that fail here; this is
    /// for authoring tools that want to reject bad input up front.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.months.is_empty() {
            return Err(ConfigError::NoMonths);
        }
        if let Some(month) = self.months.iter().find(|m| m.days == 0) {
            return Err(ConfigError::EmptyMonth {
                name: month.name.clone(),
            });
        }
        self.validate_day_units()?;
        self.validate_leap_rule()?;
        self.validate_festivals()?;
        self.validate_moons()?;
        self.validate_seasons()?;

        if let Some(cycle) = self
            .cycles
            .iter()
            .find(|c| c.length < 1 || c.entries.is_empty())
        {
            return Err(ConfigError::EmptyCycle {
                name: cycle.name.clone(),
            });
        }
        Ok(())
    }

    fn validate_day_units(&self) -> Result<(), ConfigError> {
        let units = [
            ("hoursPerDay", self.days.hours_per_day),
            ("minutesPerHour", self.days.minutes_per_hour),
            ("secondsPerMinute", self.days.seconds_per_minute),
        ];
        match units.iter().find(|(_, v)| *v == 0) {
            Some((field, _)) => Err(ConfigError::ZeroDayUnit { field: *field }),
            None => Ok(()),
        }
    }

    fn validate_leap_rule(&self) -> Result<(), ConfigError> {
        let Some(leap) = &self.leap_year_config else {
            return Ok(());
        };
        match leap.rule {
            LeapRuleKind::Simple if leap.interval.is_none_or(|i| i <= 0) => {
                Err(ConfigError::MissingLeapInterval)
            }
            LeapRuleKind::Pattern => {
                leap.pattern.as_deref().unwrap_or_default().parse::<LeapPattern>()?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn validate_festivals(&self) -> Result<(), ConfigError> {
        for festival in &self.festivals {
            let month = festival
                .month
                .checked_sub(1)
                .and_then(|idx| self.months.get(idx));
            let max_day = month.map_or(0, |m| m.days.max(m.leap_days.unwrap_or(0)));
            if festival.day == 0 || festival.day > max_day {
                return Err(ConfigError::FestivalOutOfRange {
                    name:  festival.name.clone(),
                    month: festival.month,
                    day:   festival.day,
                });
            }
        }
        Ok(())
    }

    fn validate_moons(&self) -> Result<(), ConfigError> {
        for moon in &self.moons {
            if !moon.cycle_length.is_finite() || moon.cycle_length <= 0.0 {
                return Err(ConfigError::InvalidMoonCycle {
                    name:   moon.name.clone(),
                    length: moon.cycle_length,
                });
            }
            if moon.phases.is_empty() {
                return Err(ConfigError::NoMoonPhases {
                    name: moon.name.clone(),
                });
            }
            // phases must tile [0, 1) in order
            let meets = |a: f64, b: f64| (a - b).abs() <= PHASE_BOUND_TOLERANCE;
            let mut previous_end = 0.0_f64;
            for phase in &moon.phases {
                if !meets(phase.start, previous_end) || phase.end < phase.start {
                    return Err(ConfigError::PhaseOrder {
                        moon:  moon.name.clone(),
                        phase: phase.name.clone(),
                    });
                }
                previous_end = phase.end;
            }
            if !meets(previous_end, 1.0) {
                return Err(ConfigError::PhaseOrder {
                    moon:  moon.name.clone(),
                    phase: moon.phases.last().map(|p| p.name.clone()).unwrap_or_default(),
                });
            }
        }
        Ok(())
    }

    fn validate_seasons(&self) -> Result<(), ConfigError> {
        let months = self.months.len();
        for season in &self.seasons {
            if let Some((start, end)) = season.month_bounds() {
                if !(1..=months).contains(&start) || !(1..=months).contains(&end) {
                    return Err(ConfigError::SeasonMonthOutOfRange {
                        name: season.name.clone(),
                        months,
                    });
                }
            }
        }
        Ok(())
    }

    /// Offset between internal and display years
    #[inline]
    pub const fn year_zero(&self) -> i64 {
        self.years.year_zero
    }

    /// Display year of the given components
    #[inline]
    pub const fn display_year(&self, components: &TimeComponents) -> i64 {
        components.display_year(self.years.year_zero)
    }

    /// Length of the weekday cycle
    pub fn week_length(&self) -> usize {
        if self.weekdays.is_empty() {
            DEFAULT_WEEK_LENGTH
        } else {
            self.weekdays.len()
        }
    }

    /// Looks up a named date format template
    pub fn date_format(&self, name: &str) -> Option<&str> {
        self.date_formats.get(name).map(String::as_str)
    }
}
