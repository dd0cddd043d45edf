//! Shared fixtures for unit tests.

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use crate::accounting::{days_in_month, days_in_year, epoch_day};
use crate::config::CalendarConfig;
use crate::{TimeAuthority, TimeComponents};

/// Routes crate logs to the test writer. `RUST_LOG` overrides the default
/// `realm_calendar=debug` filter; repeated calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("realm_calendar=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Midnight on the given internal year, 0-indexed month and day
pub const fn components(year: i64, month: usize, day_of_month: u32) -> TimeComponents {
    TimeComponents::date(year, month, day_of_month)
}

fn gregorian_value() -> Value {
    let months = [
        ("January", "Jan", 31, None),
        ("February", "Feb", 28, Some(29)),
        ("March", "Mar", 31, None),
        ("April", "Apr", 30, None),
        ("May", "May", 31, None),
        ("June", "Jun", 30, None),
        ("July", "Jul", 31, None),
        ("August", "Aug", 31, None),
        ("September", "Sep", 30, None),
        ("October", "Oct", 31, None),
        ("November", "Nov", 30, None),
        ("December", "Dec", 31, None),
    ];
    let months: Vec<Value> = months
        .iter()
        .enumerate()
        .map(|(i, (name, abbreviation, days, leap_days))| {
            json!({
                "name": name,
                "abbreviation": abbreviation,
                "ordinal": i + 1,
                "days": days,
                "leapDays": leap_days,
            })
        })
        .collect();

    let weekdays: Vec<Value> = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        .into_iter()
        .map(|name: &str| json!({ "name": name, "abbreviation": name.get(..3) }))
        .collect();

    let phases = [
        ("New Moon", "🌑"),
        ("Waxing Crescent", "🌒"),
        ("First Quarter", "🌓"),
        ("Waxing Gibbous", "🌔"),
        ("Full Moon", "🌕"),
        ("Waning Gibbous", "🌖"),
        ("Last Quarter", "🌗"),
        ("Waning Crescent", "🌘"),
    ];
    let phases: Vec<Value> = phases
        .iter()
        .enumerate()
        .map(|(i, (name, icon))| {
            let mut phase = json!({
                "name": name,
                "icon": icon,
                "start": i as f64 / 8.0,
                "end": (i + 1) as f64 / 8.0,
            });
            if i == 0 {
                phase["rising"] = json!("Dark Moon");
                phase["fading"] = json!("Sliver");
            }
            phase
        })
        .collect();

    let zodiac: Vec<Value> = [
        "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster", "Dog", "Pig",
    ]
    .iter()
    .map(|name| json!({ "name": name }))
    .collect();

    json!({
        "name": "Gregorian",
        "months": months,
        "weekdays": weekdays,
        "years": { "yearZero": 0, "firstWeekday": 0 },
        "leapYearConfig": { "rule": "gregorian" },
        "festivals": [{ "name": "Midwinter", "month": 1, "day": 1, "countsForWeekday": true }],
        "moons": [{
            "name": "Luna",
            "cycleLength": 30.0,
            "phases": phases,
            "referenceDate": { "year": 2000, "month": 0, "day": 0 },
        }],
        "seasons": [
            { "name": "Spring", "monthStart": 3, "monthEnd": 5 },
            { "name": "Summer", "monthStart": 6, "monthEnd": 8 },
            { "name": "Autumn", "monthStart": 9, "monthEnd": 11 },
            { "name": "Winter", "monthStart": 12, "monthEnd": 2 },
        ],
        "cycles": [{ "name": "Zodiac", "length": 1, "offset": 8, "basedOn": "year", "entries": zodiac }],
    })
}

/// Gregorian-like calendar JSON: Gregorian leap rule, one moon, four seasons
pub fn gregorian_json() -> String {
    gregorian_value().to_string()
}

/// [`gregorian_json`] parsed into a config
pub fn gregorian_config() -> CalendarConfig {
    CalendarConfig::from_json(&gregorian_json()).expect("gregorian fixture should load")
}

/// Three 10-day months; month B gains a day every second year starting at 0
pub fn three_month_config() -> CalendarConfig {
    let json = json!({
        "name": "Triad",
        "months": [
            { "name": "A", "days": 10 },
            { "name": "B", "days": 10, "leapDays": 11 },
            { "name": "C", "days": 10 },
        ],
        "leapYearConfig": { "rule": "simple", "interval": 2, "start": 0 },
    });
    CalendarConfig::from_json(&json.to_string()).expect("three-month fixture should load")
}

/// Time authority counting seconds from midnight of internal year 0, using
/// the calendar's own leap-aware month lengths.
#[derive(Debug, Clone)]
pub struct FixedDayAuthority {
    config: CalendarConfig,
}

impl FixedDayAuthority {
    pub const fn new(config: CalendarConfig) -> Self {
        Self { config }
    }

    fn seconds_per_hour(&self) -> i64 {
        i64::from(self.config.days.minutes_per_hour) * i64::from(self.config.days.seconds_per_minute)
    }
}

impl TimeAuthority for FixedDayAuthority {
    fn components_to_time(&self, components: &TimeComponents) -> i64 {
        let day = epoch_day(&self.config, components);
        let spm = i64::from(self.config.days.seconds_per_minute);
        day * self.config.days.seconds_per_day()
            + i64::from(components.hour) * self.seconds_per_hour()
            + i64::from(components.minute) * spm
            + i64::from(components.second)
    }

    fn time_to_components(&self, world_time: i64) -> TimeComponents {
        let seconds_per_day = self.config.days.seconds_per_day();
        let mut day = world_time.div_euclid(seconds_per_day);
        let mut rest = world_time.rem_euclid(seconds_per_day);

        let year_zero = self.config.year_zero();
        let year_length = |year: i64| i64::from(days_in_year(&self.config, year + year_zero));
        let mut year = 0;
        while day < 0 {
            year -= 1;
            day += year_length(year);
        }
        while day >= year_length(year) {
            day -= year_length(year);
            year += 1;
        }

        let mut month = 0;
        loop {
            let length = i64::from(days_in_month(&self.config, month, year + year_zero));
            if day < length || month + 1 >= self.config.months.len() {
                break;
            }
            day -= length;
            month += 1;
        }

        let hour = rest / self.seconds_per_hour();
        rest %= self.seconds_per_hour();
        let spm = i64::from(self.config.days.seconds_per_minute);
        TimeComponents {
            year,
            month,
            day_of_month: day as u32,
            hour: hour as u32,
            minute: (rest / spm) as u32,
            second: (rest % spm) as u32,
        }
    }
}
