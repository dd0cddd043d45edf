//! Named weeks, counted within the month or through the year.

use serde::Serialize;

use crate::accounting::day_of_year;
use crate::config::{CalendarConfig, WeekKind};
use crate::TimeComponents;

/// The named week a date falls in. `week_number` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekInfo {
    pub week_number: u32,
    pub week_name:   String,
    pub week_abbr:   String,
    #[serde(rename = "type")]
    pub kind:        WeekKind,
}

/// Named week for `components`, or `None` when named weeks are disabled.
///
/// Names cycle when there are more weeks than names; with no names
/// configured the name fields are empty.
pub fn current_week(config: &CalendarConfig, components: &TimeComponents) -> Option<WeekInfo> {
    let weeks = config.weeks.as_ref().filter(|w| w.enabled)?;
    let week_length = config.week_length() as u32;

    let day = match weeks.kind {
        WeekKind::MonthBased => components.day_of_month,
        WeekKind::YearBased => day_of_year(config, components),
    };
    let week_index = day / week_length;

    let (week_name, week_abbr) = if weeks.names.is_empty() {
        (String::new(), String::new())
    } else {
        let entry = &weeks.names[week_index as usize % weeks.names.len()];
        let abbr = entry.abbreviation.clone().unwrap_or_else(|| entry.name.clone());
        (entry.name.clone(), abbr)
    };

    Some(WeekInfo {
        week_number: week_index + 1,
        week_name,
        week_abbr,
        kind: weeks.kind,
    })
}
