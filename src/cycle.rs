//! Repeating named cycles (zodiac years, market days, and the like).

use serde::Serialize;

use crate::accounting::{day_of_year, epoch_day};
use crate::config::{CalendarConfig, Cycle, CycleBasis};
use crate::consts::CYCLE_LINE_BREAK;
use crate::era::current_era;
use crate::TimeComponents;

/// Position of one cycle at a moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleValue {
    pub cycle_name: String,
    /// 0-indexed entry, `None` for a cycle with zero length or no entries
    pub index:      Option<usize>,
    pub entry_name: String,
}

impl CycleValue {
    /// 1-indexed entry number, 0 when the cycle did not resolve
    pub fn number(&self) -> usize {
        self.index.map_or(0, |idx| idx + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CycleValues {
    pub text:   String,
    pub values: Vec<CycleValue>,
}

/// Value a cycle counts from, per its `basedOn`
pub fn epoch_value(config: &CalendarConfig, basis: CycleBasis, components: &TimeComponents) -> i64 {
    let display_year = config.display_year(components);
    match basis {
        CycleBasis::Year => display_year,
        CycleBasis::EraYear => current_era(config, display_year).map_or(display_year, |era| era.year_in_era),
        CycleBasis::Month => components.month as i64,
        CycleBasis::MonthDay => i64::from(components.day_of_month),
        CycleBasis::Day => epoch_day(config, components),
        CycleBasis::YearDay => i64::from(day_of_year(config, components)),
    }
}

/// Entry index of `cycle` for a given epoch value
pub fn cycle_index(cycle: &Cycle, epoch_value: i64) -> Option<usize> {
    if cycle.length < 1 || cycle.entries.is_empty() {
        return None;
    }
    let entries = cycle.entries.len() as i64;
    let cycle_number = epoch_value.div_euclid(cycle.length);
    let shift = cycle.offset.div_euclid(cycle.length);
    Some((cycle_number + shift).rem_euclid(entries) as usize)
}

/// Every configured cycle's entry at `components`, plus the rendered cycle text.
///
/// The text comes from `cycleFormat`, where `{{1}}`, `{{2}}`, … stand for
/// the cycles in declared order and a literal `\n` becomes a line break.
pub fn cycle_values(config: &CalendarConfig, components: &TimeComponents) -> CycleValues {
    let values: Vec<CycleValue> = config
        .cycles
        .iter()
        .map(|cycle| {
            let index = cycle_index(cycle, epoch_value(config, cycle.based_on, components));
            CycleValue {
                cycle_name: cycle.name.clone(),
                index,
                entry_name: index
                    .and_then(|idx| cycle.entries.get(idx))
                    .map(|entry| entry.name.clone())
                    .unwrap_or_default(),
            }
        })
        .collect();

    let template = config.cycle_format.clone().unwrap_or_else(|| {
        (1..=values.len())
            .map(|n| format!("{{{{{n}}}}}"))
            .collect::<Vec<_>>()
            .join(" ")
    });
    let text = values
        .iter()
        .enumerate()
        .fold(template, |text, (i, value)| {
            text.replace(&format!("{{{{{}}}}}", i + 1), &value.entry_name)
        })
        .replace(CYCLE_LINE_BREAK, "\n");

    CycleValues { text, values }
}
