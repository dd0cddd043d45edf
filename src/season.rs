//! Season lookup by day of year.

use tracing::debug;

use crate::accounting::{day_of_year, days_before_month, days_in_month, days_in_year};
use crate::config::{CalendarConfig, Season};
use crate::range::WrappingRange;
use crate::TimeComponents;

/// Day-of-year range a season covers in `display_year`, both ends inclusive.
///
/// Month-based bounds take precedence over day-of-year bounds. Returns `None`
/// for a season with neither.
pub fn season_range(config: &CalendarConfig, season: &Season, display_year: i64) -> Option<WrappingRange> {
    if let Some((month_start, month_end)) = season.month_bounds() {
        let start_month = month_start.saturating_sub(1);
        let end_month = month_end.saturating_sub(1);
        let start_day = season.day_start.unwrap_or(1).saturating_sub(1);
        let end_day = season
            .day_end
            .unwrap_or_else(|| days_in_month(config, end_month, display_year))
            .saturating_sub(1);

        let start = days_before_month(config, start_month, display_year) + start_day;
        let end = days_before_month(config, end_month, display_year) + end_day;
        return Some(WrappingRange::new(start, end));
    }

    match (season.day_start, season.day_end) {
        (Some(start), Some(end)) => Some(WrappingRange::new(start, end)),
        _ => None,
    }
}

/// Index of the season containing `components`.
///
/// Falls back to the first season when none matches; `None` only when no
/// seasons are configured.
pub fn current_season_index(config: &CalendarConfig, components: &TimeComponents) -> Option<usize> {
    if config.seasons.is_empty() {
        return None;
    }
    let display_year = config.display_year(components);
    let doy = day_of_year(config, components);

    let matched = config.seasons.iter().position(|season| {
        season_range(config, season, display_year).is_some_and(|range| range.contains_inclusive(doy))
    });
    if matched.is_none() {
        debug!(doy, "no season covers day, using first season");
    }
    Some(matched.unwrap_or(0))
}

/// Season containing `components`, with the same fallback as [`current_season_index`]
pub fn current_season<'a>(config: &'a CalendarConfig, components: &TimeComponents) -> Option<&'a Season> {
    current_season_index(config, components).and_then(|idx| config.seasons.get(idx))
}

/// Fraction of the current season elapsed at `components`, in `[0, 1)`
pub fn season_progress(config: &CalendarConfig, components: &TimeComponents) -> Option<f64> {
    let season = current_season(config, components)?;
    let display_year = config.display_year(components);
    let range = season_range(config, season, display_year)?;
    let year_length = days_in_year(config, display_year);

    let offset = range.offset_of(day_of_year(config, components), year_length);
    let span = range.span_inclusive(year_length).max(1);
    Some((f64::from(offset) / f64::from(span)).min(1.0))
}
