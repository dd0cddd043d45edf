//! Token-based date/time formatting.
//!
//! Templates mix standard tokens (`YYYY`, `MMMM`, `D`, `HH`, …) with bracket
//! tokens (`[moon]`, `[approxTime]`, …). Tokens match longest first, so `MMMM`
//! is never read as four `M`s. A bracket token with an unrecognized name
//! renders its inner text, which doubles as the escape for literal words:
//! `[Day] D` renders as `Day 14`.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::accounting::day_of_year;
use crate::approx::{approx_date, approx_time, ApproxTime};
use crate::canonical::canonical_hour;
use crate::config::CalendarConfig;
use crate::cycle::{cycle_values, CycleValues};
use crate::era::{current_era, format_year_with_era, EraInfo};
use crate::festival::{find_festival_day, weekday};
use crate::moon::{moon_phase, MoonPhaseInfo};
use crate::season::current_season_index;
use crate::week::{current_week, WeekInfo};
use crate::TimeComponents;

/// Template used when a named date format is missing
pub const DEFAULT_DATE_FORMAT: &str = "D MMMM YYYY";

// alternation is leftmost-first, so longer tokens must come first
#[allow(clippy::expect_used)]
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[([^\]]*)\]|YYYY|YY|YN|YA|YZ|Y|MMMM|MMM|MM|M|DDD|DD|DO|D|EEEE|EEE|EE|E|QQQQ|QQQ|QQ|Q|WN|WA|ww|w|Z|HH|H|hh|h|mm|m|ss|s|A|a",
    )
    .expect("token pattern is valid")
});

/// Caller-supplied values the calendar itself does not know.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions<'a> {
    /// Rendered by the `Z` token
    pub climate_zone: Option<&'a str>,
}

/// Every derived fact a template can reference, resolved once per call.
#[derive(Debug, Clone)]
struct DateParts {
    display_year:   i64,
    era:            Option<EraInfo>,
    year_with_era:  String,
    month_number:   usize,
    month_name:     String,
    month_abbr:     String,
    day:            u32,
    day_of_year:    u32,
    weekday:        Option<usize>,
    weekday_name:   String,
    weekday_abbr:   String,
    festival:       Option<String>,
    season_number:  Option<usize>,
    season_name:    String,
    season_abbr:    String,
    week:           Option<WeekInfo>,
    climate_zone:   String,
    hour:           u32,
    minute:         u32,
    second:         u32,
    hours_per_day:  u32,
    moon:           Option<MoonPhaseInfo>,
    canonical:      Option<(String, String)>,
    cycles:         CycleValues,
    approx_time:    ApproxTime,
    approx_date:    Option<String>,
}

impl DateParts {
    fn resolve(config: &CalendarConfig, components: &TimeComponents, options: FormatOptions<'_>) -> Self {
        let display_year = config.display_year(components);
        let month = config.months.get(components.month);
        let weekday = weekday(config, components);
        let festival = find_festival_day(config, components).map(|f| f.name.clone());

        // on intercalary days the weekday names carry the festival instead
        let (weekday_name, weekday_abbr) = match weekday.and_then(|idx| config.weekdays.get(idx)) {
            Some(day) => (day.name.clone(), day.short_name().to_owned()),
            None if weekday.is_none() => {
                let name = festival.clone().unwrap_or_default();
                (name.clone(), name)
            }
            None => (String::new(), String::new()),
        };

        let season_number = current_season_index(config, components);
        let season = season_number.and_then(|idx| config.seasons.get(idx));

        Self {
            display_year,
            era: current_era(config, display_year),
            year_with_era: format_year_with_era(config, display_year),
            month_number: components.month_number(),
            month_name: month.map(|m| m.name.clone()).unwrap_or_default(),
            month_abbr: month.map(|m| m.short_name().to_owned()).unwrap_or_default(),
            day: components.day_number(),
            day_of_year: day_of_year(config, components) + 1,
            weekday,
            weekday_name,
            weekday_abbr,
            festival,
            season_number: season_number.map(|idx| idx + 1),
            season_name: season.map(|s| s.name.clone()).unwrap_or_default(),
            season_abbr: season.map(|s| s.short_name().to_owned()).unwrap_or_default(),
            week: current_week(config, components),
            climate_zone: options.climate_zone.unwrap_or_default().to_owned(),
            hour: components.hour,
            minute: components.minute,
            second: components.second,
            hours_per_day: config.days.hours_per_day,
            moon: moon_phase(config, 0, components),
            canonical: canonical_hour(config, components).map(|c| (c.name.clone(), c.short_name().to_owned())),
            cycles: cycle_values(config, components),
            approx_time: approx_time(config, components),
            approx_date: approx_date(config, components),
        }
    }

    fn twelve_hour(&self) -> u32 {
        let half = (self.hours_per_day / 2).max(1);
        match self.hour % half {
            0 => half,
            h => h,
        }
    }

    const fn meridiem(&self) -> &'static str {
        if self.hour >= self.hours_per_day / 2 { "PM" } else { "AM" }
    }

    fn standard(&self, token: &str) -> String {
        let opt_number = |n: Option<usize>, width: usize| n.map(|n| format!("{n:0width$}")).unwrap_or_default();
        match token {
            "YYYY" => format!("{:04}", self.display_year),
            "YY" => format!("{:02}", self.display_year.rem_euclid(100)),
            "Y" => self.display_year.to_string(),
            "YN" => self.era.as_ref().map(|e| e.name.clone()).unwrap_or_default(),
            "YA" => self.era.as_ref().map(|e| e.abbreviation.clone()).unwrap_or_default(),
            "YZ" => self.year_with_era.clone(),
            "MMMM" => self.month_name.clone(),
            "MMM" => self.month_abbr.clone(),
            "MM" => format!("{:02}", self.month_number),
            "M" => self.month_number.to_string(),
            "DDD" => self.day_of_year.to_string(),
            "DD" => format!("{:02}", self.day),
            "DO" => ordinal(self.day),
            "D" => self.day.to_string(),
            "EEEE" => self.weekday_name.clone(),
            "EEE" => self.weekday_abbr.clone(),
            "EE" => opt_number(self.weekday.map(|w| w + 1), 2),
            "E" => opt_number(self.weekday.map(|w| w + 1), 1),
            "QQQQ" => self.season_name.clone(),
            "QQQ" => self.season_abbr.clone(),
            "QQ" => opt_number(self.season_number, 2),
            "Q" => opt_number(self.season_number, 1),
            "WN" => self.week.as_ref().map(|w| w.week_name.clone()).unwrap_or_default(),
            "WA" => self.week.as_ref().map(|w| w.week_abbr.clone()).unwrap_or_default(),
            "ww" => self.week.as_ref().map(|w| format!("{:02}", w.week_number)).unwrap_or_default(),
            "w" => self.week.as_ref().map(|w| w.week_number.to_string()).unwrap_or_default(),
            "Z" => self.climate_zone.clone(),
            "HH" => format!("{:02}", self.hour),
            "H" => self.hour.to_string(),
            "hh" => format!("{:02}", self.twelve_hour()),
            "h" => self.twelve_hour().to_string(),
            "mm" => format!("{:02}", self.minute),
            "m" => self.minute.to_string(),
            "ss" => format!("{:02}", self.second),
            "s" => self.second.to_string(),
            "A" => self.meridiem().to_owned(),
            "a" => self.meridiem().to_lowercase(),
            other => other.to_owned(),
        }
    }

    fn bracket(&self, name: &str) -> String {
        let first_cycle = self.cycles.values.first();
        let resolved = match name {
            "moon" => self.moon.as_ref().map(|m| m.name.clone()),
            "moonPhase" => self.moon.as_ref().map(|m| m.sub_phase_name.clone()),
            "moonIcon" => self.moon.as_ref().map(|m| m.icon.clone().unwrap_or_default()),
            "canonicalHour" => self.canonical.as_ref().map(|(name, _)| name.clone()),
            "canonicalHourAbbr" => self.canonical.as_ref().map(|(_, abbr)| abbr.clone()),
            "cycle" => Some(self.cycles.text.clone()),
            "cycleName" => first_cycle.map(|c| c.entry_name.clone()),
            "cycleNumber" => first_cycle.map(|c| c.number().to_string()),
            "cycleRoman" => first_cycle.map(|c| roman_numeral(c.number())),
            "approxTime" => Some(self.approx_time.to_string()),
            "approxDate" => self.approx_date.clone(),
            "festival" => self.festival.clone(),
            literal => return literal.to_owned(),
        };
        resolved.unwrap_or_default()
    }
}

/// Renders `template` for `components`
pub fn format_date(config: &CalendarConfig, components: &TimeComponents, template: &str) -> String {
    format_date_with(config, components, template, FormatOptions::default())
}

/// Renders `template` for `components` with caller-supplied extras
pub fn format_date_with(
    config: &CalendarConfig,
    components: &TimeComponents,
    template: &str,
    options: FormatOptions<'_>,
) -> String {
    let parts = DateParts::resolve(config, components, options);
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures<'_>| match caps.get(1) {
            Some(inner) => parts.bracket(inner.as_str()),
            None => parts.standard(&caps[0]),
        })
        .into_owned()
}

/// Renders the calendar's named date format, falling back to [`DEFAULT_DATE_FORMAT`]
pub fn format_named(config: &CalendarConfig, components: &TimeComponents, name: &str) -> String {
    let template = config.date_format(name).unwrap_or_else(|| {
        debug!(name, "unknown date format, using default");
        DEFAULT_DATE_FORMAT
    });
    format_date(config, components, template)
}

/// English ordinal: `1st`, `2nd`, `3rd`, `11th`, `22nd`
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Roman numeral for `n`; empty for 0
pub fn roman_numeral(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
