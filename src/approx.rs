//! Coarse, human-readable descriptions of the time of day and time of season.

use serde::Serialize;

use crate::config::CalendarConfig;
use crate::consts::{
    DAY_EDGE_BAND, EARLY_SEASON_MAX, EVENING_START, LATE_SEASON_MIN, MIDNIGHT_BAND, NIGHT_EDGE_BAND,
    NOON_BAND,
};
use crate::daylight::{is_daytime, progress_day, progress_night};
use crate::prelude::*;
use crate::season::{current_season, season_progress};
use crate::TimeComponents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum ApproxTime {
    #[display(fmt = "Sunrise")]
    Sunrise,
    #[display(fmt = "Dawn")]
    Dawn,
    #[display(fmt = "Morning")]
    Morning,
    #[display(fmt = "Noon")]
    Noon,
    #[display(fmt = "Afternoon")]
    Afternoon,
    #[display(fmt = "Evening")]
    Evening,
    #[display(fmt = "Dusk")]
    Dusk,
    #[display(fmt = "Sunset")]
    Sunset,
    #[display(fmt = "Midnight")]
    Midnight,
    #[display(fmt = "Night")]
    Night,
}

impl ApproxTime {
    /// Classifies a position within the daylight span
    pub fn from_day_progress(progress: f64) -> Self {
        if progress <= DAY_EDGE_BAND {
            Self::Sunrise
        } else if progress >= 1.0 - DAY_EDGE_BAND {
            Self::Sunset
        } else if (progress - 0.5).abs() <= NOON_BAND {
            Self::Noon
        } else if progress < 0.5 {
            Self::Morning
        } else if progress < EVENING_START {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }

    /// Classifies a position within the night
    pub fn from_night_progress(progress: f64) -> Self {
        if progress <= NIGHT_EDGE_BAND {
            Self::Dusk
        } else if progress >= 1.0 - NIGHT_EDGE_BAND {
            Self::Dawn
        } else if (progress - 0.5).abs() <= MIDNIGHT_BAND {
            Self::Midnight
        } else {
            Self::Night
        }
    }
}

/// Approximate time of day at `components`
pub fn approx_time(config: &CalendarConfig, components: &TimeComponents) -> ApproxTime {
    if is_daytime(config, components) {
        ApproxTime::from_day_progress(progress_day(config, components))
    } else {
        ApproxTime::from_night_progress(progress_night(config, components))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum SeasonStage {
    #[display(fmt = "Early")]
    Early,
    #[display(fmt = "Mid")]
    Mid,
    #[display(fmt = "Late")]
    Late,
}

impl SeasonStage {
    pub fn from_progress(progress: f64) -> Self {
        if progress <= EARLY_SEASON_MAX {
            Self::Early
        } else if progress >= LATE_SEASON_MIN {
            Self::Late
        } else {
            Self::Mid
        }
    }
}

/// Approximate date such as `"Late Winter"`, or `None` without seasons
pub fn approx_date(config: &CalendarConfig, components: &TimeComponents) -> Option<String> {
    let season = current_season(config, components)?;
    let stage = season_progress(config, components).map_or(SeasonStage::Mid, SeasonStage::from_progress);
    Some(format!("{stage} {}", season.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DaylightConfig, Season};
    use crate::test_utils::{components, gregorian_config};

    #[test]
    fn test_day_bands() {
        struct TestCase {
            progress: f64,
            expected: ApproxTime,
        }
        let cases = [
            TestCase { progress: 0.0, expected: ApproxTime::Sunrise },
            TestCase { progress: 0.04, expected: ApproxTime::Sunrise },
            TestCase { progress: 0.2, expected: ApproxTime::Morning },
            TestCase { progress: 0.47, expected: ApproxTime::Noon },
            TestCase { progress: 0.53, expected: ApproxTime::Noon },
            TestCase { progress: 0.6, expected: ApproxTime::Afternoon },
            TestCase { progress: 0.85, expected: ApproxTime::Evening },
            TestCase { progress: 0.97, expected: ApproxTime::Sunset },
        ];
        for case in &cases {
            assert_eq!(
                ApproxTime::from_day_progress(case.progress),
                case.expected,
                "day progress {}",
                case.progress
            );
        }
    }

    #[test]
    fn test_night_bands() {
        assert_eq!(ApproxTime::from_night_progress(0.0), ApproxTime::Dusk);
        assert_eq!(ApproxTime::from_night_progress(0.2), ApproxTime::Night);
        assert_eq!(ApproxTime::from_night_progress(0.5), ApproxTime::Midnight);
        assert_eq!(ApproxTime::from_night_progress(0.8), ApproxTime::Night);
        assert_eq!(ApproxTime::from_night_progress(0.99), ApproxTime::Dawn);
    }

    #[test]
    fn test_approx_time_on_winter_solstice() {
        let mut config = gregorian_config();
        config.daylight = Some(DaylightConfig {
            enabled:         true,
            shortest_day:    8.0,
            longest_day:     16.0,
            winter_solstice: 355,
            summer_solstice: 172,
        });
        let day = components(2023, 11, 21);
        assert_eq!(approx_time(&config, &day.at(12, 0, 0)), ApproxTime::Noon);
        assert_eq!(approx_time(&config, &day.at(9, 0, 0)), ApproxTime::Morning);
        assert_eq!(approx_time(&config, &day.at(0, 0, 0)), ApproxTime::Midnight);
        assert_eq!(approx_time(&config, &day.at(7, 45, 0)), ApproxTime::Dawn);
        assert_eq!(approx_time(&config, &day.at(16, 30, 0)), ApproxTime::Dusk);
        assert_eq!(approx_time(&config, &day.at(21, 0, 0)), ApproxTime::Night);
    }

    #[test]
    fn test_approx_date() {
        let mut config = gregorian_config();
        config.seasons = vec![Season {
            name: "Winter".to_owned(),
            day_start: Some(355),
            day_end: Some(79),
            ..Season::default()
        }];
        let early = approx_date(&config, &components(2023, 11, 25));
        assert_eq!(early.as_deref(), Some("Early Winter"));
        let mid = approx_date(&config, &components(2023, 1, 3));
        assert_eq!(mid.as_deref(), Some("Mid Winter"));
        let late = approx_date(&config, &components(2023, 2, 15));
        assert_eq!(late.as_deref(), Some("Late Winter"));

        config.seasons.clear();
        assert!(approx_date(&config, &components(2023, 2, 15)).is_none());
    }

    #[test]
    fn test_stage_thresholds_inclusive() {
        assert_eq!(SeasonStage::from_progress(0.33), SeasonStage::Early);
        assert_eq!(SeasonStage::from_progress(0.5), SeasonStage::Mid);
        assert_eq!(SeasonStage::from_progress(0.66), SeasonStage::Late);
    }
}
