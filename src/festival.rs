//! Festival and intercalary days, and weekday counting around them.

use crate::accounting::epoch_day;
use crate::config::{CalendarConfig, Festival};
use crate::leap::{LeapRule, is_leap_year};
use crate::TimeComponents;

fn occurs_in(festival: &Festival, leap: bool) -> bool {
    leap || !festival.leap_year_only
}

/// Festival falling on the date of `components`, honoring `leapYearOnly`
pub fn find_festival_day<'a>(config: &'a CalendarConfig, components: &TimeComponents) -> Option<&'a Festival> {
    let leap = is_leap_year(config, config.display_year(components));
    let (month, day) = (components.month_number(), components.day_number());
    config
        .festivals
        .iter()
        .find(|f| f.month == month && f.day == day && occurs_in(f, leap))
}

/// Festivals in 0-indexed `month_index` of `display_year`, in day order
pub fn festivals_in_month(config: &CalendarConfig, month_index: usize, display_year: i64) -> Vec<&Festival> {
    let leap = is_leap_year(config, display_year);
    let mut festivals: Vec<&Festival> = config
        .festivals
        .iter()
        .filter(|f| f.month == month_index + 1 && occurs_in(f, leap))
        .collect();
    festivals.sort_by_key(|f| f.day);
    festivals
}

/// Festivals outside the weekday cycle that fall strictly before the date of
/// `components` in the same year.
pub fn count_non_weekday_festivals_before(config: &CalendarConfig, components: &TimeComponents) -> u32 {
    let leap = is_leap_year(config, config.display_year(components));
    let current = (components.month_number(), components.day_number());
    config
        .festivals
        .iter()
        .filter(|f| !f.counts_for_weekday && occurs_in(f, leap) && (f.month, f.day) < current)
        .count() as u32
}

fn non_weekday_festivals_in_year(config: &CalendarConfig, leap: bool) -> i64 {
    config
        .festivals
        .iter()
        .filter(|f| !f.counts_for_weekday && occurs_in(f, leap))
        .count() as i64
}

/// Non-weekday festival days in all internal years before `internal_year`,
/// negative for years before the epoch.
fn non_weekday_festivals_before_year(config: &CalendarConfig, internal_year: i64) -> i64 {
    let rule = LeapRule::from_config(config);
    let common = non_weekday_festivals_in_year(config, false);
    let leap = non_weekday_festivals_in_year(config, true);
    let year_zero = config.year_zero();
    rule.total_over_years(year_zero, year_zero.saturating_add(internal_year), common, leap)
}

/// 0-indexed weekday of `components`.
///
/// Returns `None` on a festival day that sits outside the weekday cycle.
/// When the month sets `startingWeekday`, counting restarts at the month's
/// first day; otherwise it runs from `years.firstWeekday` at epoch day 0.
/// Non-weekday festivals before the date are skipped either way.
pub fn weekday(config: &CalendarConfig, components: &TimeComponents) -> Option<usize> {
    if find_festival_day(config, components).is_some_and(|f| !f.counts_for_weekday) {
        return None;
    }
    let week_length = config.week_length() as i64;
    let starting_weekday = config
        .months
        .get(components.month)
        .and_then(|m| m.starting_weekday);

    let counted = if let Some(start) = starting_weekday {
        let leap = is_leap_year(config, config.display_year(components));
        let month = components.month_number();
        let skipped = config
            .festivals
            .iter()
            .filter(|f| {
                !f.counts_for_weekday && occurs_in(f, leap) && f.month == month && f.day < components.day_number()
            })
            .count() as i64;
        start as i64 + i64::from(components.day_of_month) - skipped
    } else {
        let skipped = non_weekday_festivals_before_year(config, components.year)
            + i64::from(count_non_weekday_festivals_before(config, components));
        config.years.first_weekday as i64 + epoch_day(config, components) - skipped
    };

    Some(counted.rem_euclid(week_length) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{components, gregorian_config, three_month_config};

    fn festival(name: &str, month: usize, day: u32, leap_year_only: bool, counts_for_weekday: bool) -> Festival {
        Festival {
            name: name.to_owned(),
            month,
            day,
            leap_year_only,
            counts_for_weekday,
        }
    }

    #[test]
    fn test_find_festival_day() {
        let config = gregorian_config();
        // fixture: Midwinter on 1/1, counting for weekdays
        let found = find_festival_day(&config, &components(2023, 0, 0)).map(|f| f.name.as_str());
        assert_eq!(found, Some("Midwinter"));
        assert!(find_festival_day(&config, &components(2023, 0, 1)).is_none());
    }

    #[test]
    fn test_leap_only_festival() {
        let mut config = gregorian_config();
        config.festivals = vec![festival("Shieldmeet", 2, 29, true, false)];
        assert!(find_festival_day(&config, &components(2024, 1, 28)).is_some());
        assert!(find_festival_day(&config, &components(2023, 1, 28)).is_none());
        assert_eq!(festivals_in_month(&config, 1, 2023).len(), 0);
        assert_eq!(festivals_in_month(&config, 1, 2024).len(), 1);
    }

    #[test]
    fn test_leap_only_festivals_not_counted_in_common_years() {
        let mut config = gregorian_config();
        config.festivals = vec![
            festival("Leap Eve", 2, 28, true, false),
            festival("Leap Day", 2, 29, true, false),
        ];
        assert_eq!(count_non_weekday_festivals_before(&config, &components(2023, 11, 30)), 0);
        assert_eq!(count_non_weekday_festivals_before(&config, &components(2024, 11, 30)), 2);
    }

    #[test]
    fn test_count_is_strictly_before() {
        let mut config = gregorian_config();
        config.festivals = vec![
            festival("A", 3, 5, false, false),
            festival("B", 3, 10, false, false),
            festival("Counted", 3, 1, false, true),
        ];
        assert_eq!(count_non_weekday_festivals_before(&config, &components(2023, 2, 4)), 0);
        assert_eq!(count_non_weekday_festivals_before(&config, &components(2023, 2, 5)), 1);
        assert_eq!(count_non_weekday_festivals_before(&config, &components(2023, 2, 10)), 2);
        assert_eq!(count_non_weekday_festivals_before(&config, &components(2023, 1, 27)), 0);
    }

    #[test]
    fn test_festivals_in_month_sorted() {
        let mut config = gregorian_config();
        config.festivals = vec![festival("Late", 6, 20, false, true), festival("Early", 6, 2, false, true)];
        let names: Vec<&str> = festivals_in_month(&config, 5, 2023)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }

    #[test]
    fn test_weekday_follows_days() {
        let config = gregorian_config();
        // fixture first weekday 0 at year 0, day 0
        assert_eq!(weekday(&config, &components(0, 0, 0)), Some(0));
        assert_eq!(weekday(&config, &components(0, 0, 1)), Some(1));
        assert_eq!(weekday(&config, &components(0, 0, 7)), Some(0));
        assert_eq!(weekday(&config, &components(-1, 11, 30)), Some(6));
    }

    #[test]
    fn test_intercalary_days_skip_the_weekday_cycle() {
        let mut config = three_month_config();
        config.festivals = vec![festival("Between", 2, 1, false, false)];

        // 40 days since the epoch, one of them intercalary
        assert_eq!(weekday(&config, &components(1, 0, 9)), Some(4));
        // the festival itself has no weekday
        assert_eq!(weekday(&config, &components(1, 1, 0)), None);
        // the following day resumes where the cycle left off
        assert_eq!(weekday(&config, &components(1, 1, 1)), Some(5));
    }

    #[test]
    fn test_prior_years_intercalary_days_are_skipped() {
        let mut config = three_month_config();
        config.festivals = vec![festival("Between", 2, 1, false, false)];
        // year 0 has 31 days, one of them intercalary
        assert_eq!(weekday(&config, &components(1, 0, 0)), Some(30 % 7));
    }

    #[test]
    fn test_festival_count_far_from_epoch() {
        let mut config = gregorian_config();
        config.festivals = vec![
            festival("Midsummer", 7, 1, false, false),
            festival("Shieldmeet", 7, 2, true, false),
        ];
        // 400 Gregorian years hold 97 leap years
        let years = 1_000_000_000_000;
        assert_eq!(non_weekday_festivals_before_year(&config, years), years + years / 400 * 97);
        assert_eq!(non_weekday_festivals_before_year(&config, -400), -(400 + 97));
        assert!(weekday(&config, &components(years, 0, 0)).is_some());
    }

    #[test]
    fn test_month_starting_weekday() {
        let mut config = gregorian_config();
        config.months[3].starting_weekday = Some(4);
        config.festivals = vec![festival("Gap", 4, 3, false, false)];
        assert_eq!(weekday(&config, &components(2023, 3, 0)), Some(4));
        assert_eq!(weekday(&config, &components(2023, 3, 1)), Some(5));
        assert_eq!(weekday(&config, &components(2023, 3, 2)), None);
        assert_eq!(weekday(&config, &components(2023, 3, 3)), Some(6));
        assert_eq!(weekday(&config, &components(2023, 3, 4)), Some(0));
    }
}
