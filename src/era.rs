//! Era lookup and era-qualified year rendering.

use serde::Serialize;
use tracing::debug;

use crate::config::{CalendarConfig, Era, EraFormat};
use crate::consts::{ERA_ABBREVIATION, ERA_NAME, ERA_YEAR, ERA_YEAR_IN_ERA};

/// The era a display year falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EraInfo {
    pub name:         String,
    pub abbreviation: String,
    pub format:       EraFormat,
    pub template:     Option<String>,
    pub year_in_era:  i64,
}

impl EraInfo {
    fn from_era(era: &Era, year_in_era: i64) -> Self {
        Self {
            name: era.name.clone(),
            abbreviation: era.abbreviation.clone(),
            format: era.format,
            template: era.template.clone(),
            year_in_era,
        }
    }
}

/// Era containing `display_year`.
///
/// Later-starting eras win over earlier ones. With no match, the first
/// declared era is returned and `year_in_era` is the display year itself,
/// not an offset from the era start.
pub fn current_era(config: &CalendarConfig, display_year: i64) -> Option<EraInfo> {
    let mut by_start: Vec<&Era> = config.eras.iter().collect();
    by_start.sort_by(|a, b| b.start_year.cmp(&a.start_year));

    let matched = by_start.into_iter().find(|era| {
        display_year >= era.start_year && era.end_year.is_none_or(|end| display_year <= end)
    });

    match matched {
        Some(era) => Some(EraInfo::from_era(era, display_year - era.start_year + 1)),
        None => {
            let first = config.eras.first()?;
            debug!(display_year, era = %first.name, "no era covers year, using first declared era");
            Some(EraInfo::from_era(first, display_year))
        }
    }
}

/// Renders `display_year` qualified by its era.
///
/// A template substitutes `{{year}}`, `{{abbreviation}}`, `{{era}}` and
/// `{{yearInEra}}`; otherwise the abbreviation is placed before or after the
/// era year. Without eras the bare year is returned.
pub fn format_year_with_era(config: &CalendarConfig, display_year: i64) -> String {
    let Some(era) = current_era(config, display_year) else {
        return display_year.to_string();
    };

    if let Some(template) = &era.template {
        return template
            .replace(ERA_YEAR_IN_ERA, &era.year_in_era.to_string())
            .replace(ERA_YEAR, &display_year.to_string())
            .replace(ERA_ABBREVIATION, &era.abbreviation)
            .replace(ERA_NAME, &era.name);
    }

    match era.format {
        EraFormat::Prefix => format!("{} {}", era.abbreviation, era.year_in_era),
        EraFormat::Suffix => format!("{} {}", era.year_in_era, era.abbreviation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::gregorian_config;

    fn era(name: &str, abbreviation: &str, start_year: i64, end_year: Option<i64>) -> Era {
        Era {
            name: name.to_owned(),
            abbreviation: abbreviation.to_owned(),
            start_year,
            end_year,
            ..Era::default()
        }
    }

    fn config_with_eras(eras: Vec<Era>) -> CalendarConfig {
        let mut config = gregorian_config();
        config.eras = eras;
        config
    }

    #[test]
    fn test_latest_starting_era_wins() {
        let config = config_with_eras(vec![
            era("First Age", "FA", 1, None),
            era("Second Age", "SA", 500, None),
        ]);

        let info = current_era(&config, 600).expect("era");
        assert_eq!(info.name, "Second Age");
        assert_eq!(info.year_in_era, 101);

        let info = current_era(&config, 499).expect("era");
        assert_eq!(info.name, "First Age");
        assert_eq!(info.year_in_era, 499);
    }

    #[test]
    fn test_end_year_is_inclusive() {
        let config = config_with_eras(vec![
            era("Dawn", "DA", 1, Some(100)),
            era("Dusk", "DU", 200, Some(300)),
        ]);
        assert_eq!(current_era(&config, 100).map(|e| e.name), Some("Dawn".to_owned()));
        assert_eq!(current_era(&config, 300).map(|e| e.year_in_era), Some(101));

        // gap between eras falls back to the first declared era
        let gap = current_era(&config, 150).expect("fallback era");
        assert_eq!(gap.name, "Dawn");
        assert_eq!(gap.year_in_era, 150);
    }

    #[test]
    fn test_fallback_year_is_not_offset() {
        let config = config_with_eras(vec![
            era("Late", "LT", 1000, None),
            era("Early", "ER", 100, None),
        ]);
        let info = current_era(&config, 50).expect("fallback era");
        assert_eq!(info.name, "Late");
        assert_eq!(info.year_in_era, 50);
    }

    #[test]
    fn test_no_eras() {
        let config = config_with_eras(Vec::new());
        assert!(current_era(&config, 10).is_none());
        assert_eq!(format_year_with_era(&config, 10), "10");
    }

    #[test]
    fn test_prefix_and_suffix() {
        let mut prefix = era("Reckoning", "DR", 1, None);
        prefix.format = EraFormat::Prefix;
        let config = config_with_eras(vec![prefix]);
        assert_eq!(format_year_with_era(&config, 1492), "DR 1492");

        let config = config_with_eras(vec![era("Common", "CE", 11, None)]);
        assert_eq!(format_year_with_era(&config, 20), "10 CE");
    }

    #[test]
    fn test_template_substitution() {
        let mut templated = era("Age of Ash", "AA", 101, None);
        templated.template = Some("Year {{yearInEra}} of the {{era}} ({{abbreviation}}, {{year}})".to_owned());
        let config = config_with_eras(vec![templated]);
        assert_eq!(
            format_year_with_era(&config, 150),
            "Year 50 of the Age of Ash (AA, 150)"
        );
    }
}
