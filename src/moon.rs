//! Moon phase engine.
//!
//! A moon's position in its cycle is measured from a reference new-moon date.
//! Whole days of the cycle are then dealt out across the configured phases;
//! for the common eight-phase moon the new and full phases get a short fixed
//! share and the crescent/quarter/gibbous phases split the rest.

use serde::Serialize;
use tracing::warn;

use crate::accounting::raw_day_count;
use crate::config::{CalendarConfig, MoonConfig, MoonPhaseConfig};
use crate::consts::{FADING_PREFIX, PRIMARY_PHASES, RISING_PREFIX, STANDARD_PHASE_COUNT};
use crate::TimeComponents;

/// Resolved phase of one moon at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseInfo {
    pub name:             String,
    pub sub_phase_name:   String,
    pub icon:             Option<String>,
    /// Fraction of the cycle elapsed, in `[0, 1)`
    pub position:         f64,
    pub day_in_cycle:     f64,
    pub phase_index:      usize,
    pub day_within_phase: u32,
    pub phase_duration:   u32,
}

/// Whole days assigned to each of `phase_count` phases of a `cycle_length`-day cycle.
///
/// Fractional cycle lengths are floored. The result always sums to the
/// floored length.
pub fn phase_day_distribution(phase_count: usize, cycle_length: f64) -> Vec<u32> {
    if phase_count == 0 {
        return Vec::new();
    }
    let total = if cycle_length.is_finite() && cycle_length > 0.0 {
        cycle_length.floor() as u32
    } else {
        0
    };

    if phase_count == STANDARD_PHASE_COUNT {
        let primary = total / STANDARD_PHASE_COUNT as u32;
        let secondary_count = (STANDARD_PHASE_COUNT - PRIMARY_PHASES.len()) as u32;
        let remaining = total - primary * PRIMARY_PHASES.len() as u32;
        let base = remaining / secondary_count;
        let extra = remaining % secondary_count;

        let mut secondary_rank = 0;
        return (0..phase_count)
            .map(|idx| {
                if PRIMARY_PHASES.contains(&idx) {
                    primary
                } else {
                    let days = base + u32::from(secondary_rank < extra);
                    secondary_rank += 1;
                    days
                }
            })
            .collect();
    }

    let count = phase_count as u32;
    let base = total / count;
    let extra = total % count;
    (0..count).map(|idx| base + u32::from(idx < extra)).collect()
}

/// Phase of moon `moon_index` at `components`, or `None` if the moon does
/// not exist or has no phases.
pub fn moon_phase(
    config: &CalendarConfig,
    moon_index: usize,
    components: &TimeComponents,
) -> Option<MoonPhaseInfo> {
    let moon = config.moons.get(moon_index)?;
    let first = moon.phases.first()?;

    let length = moon.cycle_length;
    let days_since_reference = days_since_reference(config, moon, components) as f64;
    if !length.is_finite() || length <= 0.0 || !moon.cycle_day_adjust.is_finite() {
        warn!(moon = %moon.name, length, "invalid moon cycle, using first phase");
        return Some(first_phase_default(first));
    }

    let wrapped = days_since_reference.rem_euclid(length) + moon.cycle_day_adjust;
    let days_into_cycle = wrapped.rem_euclid(length);
    let position = days_into_cycle / length;

    let distribution = phase_day_distribution(moon.phases.len(), length);
    let day = days_into_cycle.floor() as u32;
    let (phase_index, phase_start) = locate_phase(&distribution, day);
    let phase_duration = distribution[phase_index];
    let day_within_phase = day.saturating_sub(phase_start).min(phase_duration.saturating_sub(1));

    let phase = &moon.phases[phase_index];
    Some(MoonPhaseInfo {
        name: phase.name.clone(),
        sub_phase_name: sub_phase_name(phase, day_within_phase, phase_duration),
        icon: phase.icon.clone(),
        position,
        day_in_cycle: days_into_cycle,
        phase_index,
        day_within_phase,
        phase_duration,
    })
}

/// Phases of every configured moon, in declaration order
pub fn moon_phases(config: &CalendarConfig, components: &TimeComponents) -> Vec<MoonPhaseInfo> {
    (0..config.moons.len())
        .filter_map(|idx| moon_phase(config, idx, components))
        .collect()
}

fn days_since_reference(config: &CalendarConfig, moon: &MoonConfig, components: &TimeComponents) -> i64 {
    let reference = moon.reference_date;
    let current = raw_day_count(
        config,
        config.display_year(components),
        components.month,
        components.day_of_month,
    );
    current - raw_day_count(config, reference.year, reference.month, reference.day)
}

/// Index of the phase whose day range holds `day`, with that range's first day.
/// Days past the distributed total fall into the last non-empty phase.
fn locate_phase(distribution: &[u32], day: u32) -> (usize, u32) {
    let mut start = 0;
    let mut last_non_empty = (0, 0);
    for (idx, &days) in distribution.iter().enumerate() {
        if days == 0 {
            continue;
        }
        if day < start + days {
            return (idx, start);
        }
        last_non_empty = (idx, start);
        start += days;
    }
    last_non_empty
}

fn sub_phase_name(phase: &MoonPhaseConfig, day_within_phase: u32, duration: u32) -> String {
    if duration <= 1 {
        return phase.name.clone();
    }
    let day = f64::from(day_within_phase);
    let third = f64::from(duration) / 3.0;
    if day < third {
        phase
            .rising
            .clone()
            .unwrap_or_else(|| format!("{RISING_PREFIX} {}", phase.name))
    } else if day >= f64::from(duration) - third {
        phase
            .fading
            .clone()
            .unwrap_or_else(|| format!("{FADING_PREFIX} {}", phase.name))
    } else {
        phase.name.clone()
    }
}

fn first_phase_default(first: &MoonPhaseConfig) -> MoonPhaseInfo {
    MoonPhaseInfo {
        name:             first.name.clone(),
        sub_phase_name:   first.name.clone(),
        icon:             first.icon.clone(),
        position:         0.0,
        day_in_cycle:     0.0,
        phase_index:      0,
        day_within_phase: 0,
        phase_duration:   0,
    }
}
