//! Change tracking across successive world times.
//!
//! A [`CalendarTracker`] remembers the derived facts of the last moment it
//! saw and reports what changed on each [`tick`](CalendarTracker::tick).
//! It owns no timers; whoever drives world time decides when to tick.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::Festival;
use crate::engine::CalendarEngine;
use crate::moon::MoonPhaseInfo;
use crate::{TimeAuthority, TimeComponents};

/// Something that changed between two ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CalendarEvent {
    YearChanged {
        previous: i64,
        current:  i64,
    },
    DayChanged {
        components: TimeComponents,
    },
    SeasonChanged {
        previous: Option<String>,
        current:  Option<String>,
    },
    MoonPhaseChanged {
        moon:  usize,
        phase: MoonPhaseInfo,
    },
    CanonicalHourChanged {
        previous: Option<String>,
        current:  Option<String>,
    },
    FestivalStarted {
        festival: Festival,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    display_year:   i64,
    epoch_day:      i64,
    season:         Option<String>,
    /// Indexed like `config.moons`; `None` for a moon that does not resolve
    moon_phases:    Vec<Option<MoonPhaseInfo>>,
    canonical_hour: Option<String>,
}

impl Snapshot {
    fn capture<A: TimeAuthority>(engine: &CalendarEngine<A>, components: &TimeComponents) -> Self {
        Self {
            display_year:   engine.config().display_year(components),
            epoch_day:      engine.epoch_day(components),
            season:         engine.season(components).map(|s| s.name.clone()),
            moon_phases:    (0..engine.config().moons.len())
                .map(|moon| engine.moon_phase(moon, components))
                .collect(),
            canonical_hour: engine.canonical_hour(components).map(|c| c.name.clone()),
        }
    }
}

/// Reports calendar transitions as world time advances.
#[derive(Debug)]
pub struct CalendarTracker<A> {
    engine: CalendarEngine<A>,
    last:   Option<Snapshot>,
}

impl<A: TimeAuthority> CalendarTracker<A> {
    pub const fn new(engine: CalendarEngine<A>) -> Self {
        Self { engine, last: None }
    }

    pub const fn engine(&self) -> &CalendarEngine<A> {
        &self.engine
    }

    /// Whether a tick has been seen since creation or the last reset
    pub const fn is_primed(&self) -> bool {
        self.last.is_some()
    }

    /// Forgets the last snapshot; the next tick primes again
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances to `world_time` and returns the transitions since the last tick.
    ///
    /// The first tick after creation or [`reset`](Self::reset) only records
    /// the current state and returns no events. Moving backwards in time is
    /// reported the same way as moving forwards.
    pub fn tick(&mut self, world_time: i64) -> Vec<CalendarEvent> {
        let components = self.engine.components_at(world_time);
        let current = Snapshot::capture(&self.engine, &components);

        let Some(previous) = self.last.replace(current.clone()) else {
            trace!(world_time, "tracker primed");
            return Vec::new();
        };

        let mut events = Vec::new();
        if previous.display_year != current.display_year {
            events.push(CalendarEvent::YearChanged {
                previous: previous.display_year,
                current:  current.display_year,
            });
        }

        let day_changed = previous.epoch_day != current.epoch_day;
        if day_changed {
            events.push(CalendarEvent::DayChanged { components });
        }

        if previous.season != current.season {
            events.push(CalendarEvent::SeasonChanged {
                previous: previous.season,
                current:  current.season.clone(),
            });
        }

        for (moon, phase) in current.moon_phases.iter().enumerate() {
            let Some(phase) = phase else {
                continue;
            };
            let before = previous.moon_phases.get(moon).and_then(|p| p.as_ref()).map(|p| p.phase_index);
            if before != Some(phase.phase_index) {
                events.push(CalendarEvent::MoonPhaseChanged {
                    moon,
                    phase: phase.clone(),
                });
            }
        }

        if previous.canonical_hour != current.canonical_hour {
            events.push(CalendarEvent::CanonicalHourChanged {
                previous: previous.canonical_hour,
                current:  current.canonical_hour,
            });
        }

        if day_changed {
            if let Some(festival) = self.engine.festival(&components) {
                events.push(CalendarEvent::FestivalStarted {
                    festival: festival.clone(),
                });
            }
        }

        if !events.is_empty() {
            debug!(world_time, %components, count = events.len(), "calendar transitions");
        }
        events
    }

    /// Ends tracking and hands the engine back
    pub fn dispose(self) -> CalendarEngine<A> {
        self.engine
    }
}
