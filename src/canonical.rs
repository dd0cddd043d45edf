//! Canonical hours: named spans of the day.

use crate::config::{CalendarConfig, CanonicalHour};
use crate::range::WrappingRange;
use crate::TimeComponents;

/// Canonical hour covering `components.hour`.
///
/// Ranges are half-open (`start_hour <= hour < end_hour`) and may wrap
/// midnight. If nothing matches, an entry whose `end_hour` equals the hour
/// is accepted so that a closing hour still resolves to the period it ends.
pub fn canonical_hour<'a>(config: &'a CalendarConfig, components: &TimeComponents) -> Option<&'a CanonicalHour> {
    let hour = components.hour;
    config
        .canonical_hours
        .iter()
        .find(|entry| WrappingRange::new(entry.start_hour, entry.end_hour).contains_half_open(hour))
        .or_else(|| config.canonical_hours.iter().find(|entry| entry.end_hour == hour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{components, gregorian_config};

    fn hour(name: &str, start_hour: u32, end_hour: u32) -> CanonicalHour {
        CanonicalHour {
            name: name.to_owned(),
            abbreviation: None,
            start_hour,
            end_hour,
        }
    }

    fn name_at(config: &CalendarConfig, h: u32) -> Option<&str> {
        canonical_hour(config, &components(1, 0, 0).at(h, 0, 0)).map(|c| c.name.as_str())
    }

    #[test]
    fn test_wrapping_hour() {
        let mut config = gregorian_config();
        config.canonical_hours = vec![hour("Vigil", 22, 2)];
        assert_eq!(name_at(&config, 23), Some("Vigil"));
        assert_eq!(name_at(&config, 1), Some("Vigil"));
        assert_eq!(name_at(&config, 10), None);
    }

    #[test]
    fn test_first_match_in_declared_order() {
        let mut config = gregorian_config();
        config.canonical_hours = vec![hour("Lauds", 3, 6), hour("Prime", 6, 9), hour("Terce", 9, 12)];
        assert_eq!(name_at(&config, 3), Some("Lauds"));
        assert_eq!(name_at(&config, 6), Some("Prime"));
        assert_eq!(name_at(&config, 11), Some("Terce"));
    }

    #[test]
    fn test_end_hour_second_pass() {
        let mut config = gregorian_config();
        config.canonical_hours = vec![hour("Lauds", 3, 6), hour("Sext", 12, 15)];
        // 15 is outside every half-open range but closes Sext
        assert_eq!(name_at(&config, 15), Some("Sext"));
        assert_eq!(name_at(&config, 6), Some("Lauds"));
        assert_eq!(name_at(&config, 16), None);
    }

    #[test]
    fn test_abbreviation_falls_back_to_name() {
        let mut entry = hour("Compline", 20, 22);
        assert_eq!(entry.short_name(), "Compline");
        entry.abbreviation = Some("Com".to_owned());
        assert_eq!(entry.short_name(), "Com");
    }
}
