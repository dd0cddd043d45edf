//! Composition root tying a calendar definition to a time authority.
//!
//! The free functions in this crate take a [`CalendarConfig`] and
//! [`TimeComponents`]; [`CalendarEngine`] bundles the config with the
//! [`TimeAuthority`] that converts world time, so callers holding only a
//! world-time integer can ask for derived facts directly.

use crate::approx::{approx_date, approx_time, ApproxTime};
use crate::canonical::canonical_hour;
use crate::config::{CalendarConfig, CanonicalHour, ConfigError, Festival, Season};
use crate::cycle::{cycle_values, CycleValues};
use crate::daylight::{daylight_times, DaylightTimes};
use crate::era::{current_era, format_year_with_era, EraInfo};
use crate::festival::{festivals_in_month, find_festival_day, weekday};
use crate::format::{format_date, format_date_with, format_named, FormatOptions};
use crate::leap::is_leap_year;
use crate::moon::{moon_phase, moon_phases, MoonPhaseInfo};
use crate::season::{current_season, season_progress};
use crate::week::{current_week, WeekInfo};
use crate::{accounting, TimeAuthority, TimeComponents};

/// A calendar definition paired with the authority that owns world time.
#[derive(Debug, Clone)]
pub struct CalendarEngine<A> {
    config:    CalendarConfig,
    authority: A,
}

impl<A: TimeAuthority> CalendarEngine<A> {
    pub const fn new(config: CalendarConfig, authority: A) -> Self {
        Self { config, authority }
    }

    /// Builds an engine from a JSON calendar definition.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the JSON is malformed or fails validation.
    pub fn from_json(json: &str, authority: A) -> Result<Self, ConfigError> {
        Ok(Self::new(CalendarConfig::from_json(json)?, authority))
    }

    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub const fn authority(&self) -> &A {
        &self.authority
    }

    /// Replaces the calendar definition, keeping the authority
    pub fn set_config(&mut self, config: CalendarConfig) {
        self.config = config;
    }

    pub fn into_parts(self) -> (CalendarConfig, A) {
        (self.config, self.authority)
    }

    pub fn components_at(&self, world_time: i64) -> TimeComponents {
        self.authority.time_to_components(world_time)
    }

    pub fn time_of(&self, components: &TimeComponents) -> i64 {
        self.authority.components_to_time(components)
    }

    pub fn is_leap_year(&self, display_year: i64) -> bool {
        is_leap_year(&self.config, display_year)
    }

    pub fn days_in_month(&self, month_index: usize, display_year: i64) -> u32 {
        accounting::days_in_month(&self.config, month_index, display_year)
    }

    pub fn days_in_year(&self, display_year: i64) -> u32 {
        accounting::days_in_year(&self.config, display_year)
    }

    pub fn day_of_year(&self, components: &TimeComponents) -> u32 {
        accounting::day_of_year(&self.config, components)
    }

    pub fn epoch_day(&self, components: &TimeComponents) -> i64 {
        accounting::epoch_day(&self.config, components)
    }

    pub fn weekday(&self, components: &TimeComponents) -> Option<usize> {
        weekday(&self.config, components)
    }

    pub fn moon_phase(&self, moon_index: usize, components: &TimeComponents) -> Option<MoonPhaseInfo> {
        moon_phase(&self.config, moon_index, components)
    }

    pub fn moon_phases(&self, components: &TimeComponents) -> Vec<MoonPhaseInfo> {
        moon_phases(&self.config, components)
    }

    pub fn season(&self, components: &TimeComponents) -> Option<&Season> {
        current_season(&self.config, components)
    }

    pub fn season_progress(&self, components: &TimeComponents) -> Option<f64> {
        season_progress(&self.config, components)
    }

    pub fn era(&self, display_year: i64) -> Option<EraInfo> {
        current_era(&self.config, display_year)
    }

    pub fn format_year_with_era(&self, display_year: i64) -> String {
        format_year_with_era(&self.config, display_year)
    }

    pub fn canonical_hour(&self, components: &TimeComponents) -> Option<&CanonicalHour> {
        canonical_hour(&self.config, components)
    }

    pub fn week(&self, components: &TimeComponents) -> Option<WeekInfo> {
        current_week(&self.config, components)
    }

    pub fn cycle_values(&self, components: &TimeComponents) -> CycleValues {
        cycle_values(&self.config, components)
    }

    pub fn daylight(&self, components: &TimeComponents) -> DaylightTimes {
        daylight_times(&self.config, components)
    }

    pub fn festival(&self, components: &TimeComponents) -> Option<&Festival> {
        find_festival_day(&self.config, components)
    }

    pub fn festivals_in_month(&self, month_index: usize, display_year: i64) -> Vec<&Festival> {
        festivals_in_month(&self.config, month_index, display_year)
    }

    pub fn approx_time(&self, components: &TimeComponents) -> ApproxTime {
        approx_time(&self.config, components)
    }

    pub fn approx_date(&self, components: &TimeComponents) -> Option<String> {
        approx_date(&self.config, components)
    }

    pub fn format(&self, components: &TimeComponents, template: &str) -> String {
        format_date(&self.config, components, template)
    }

    pub fn format_with(&self, components: &TimeComponents, template: &str, options: FormatOptions<'_>) -> String {
        format_date_with(&self.config, components, template, options)
    }

    pub fn format_named(&self, components: &TimeComponents, name: &str) -> String {
        format_named(&self.config, components, name)
    }

    // world-time conveniences

    pub fn weekday_at(&self, world_time: i64) -> Option<usize> {
        self.weekday(&self.components_at(world_time))
    }

    pub fn moon_phase_at(&self, moon_index: usize, world_time: i64) -> Option<MoonPhaseInfo> {
        self.moon_phase(moon_index, &self.components_at(world_time))
    }

    pub fn season_at(&self, world_time: i64) -> Option<&Season> {
        current_season(&self.config, &self.components_at(world_time))
    }

    pub fn era_at(&self, world_time: i64) -> Option<EraInfo> {
        let components = self.components_at(world_time);
        self.era(self.config.display_year(&components))
    }

    pub fn canonical_hour_at(&self, world_time: i64) -> Option<&CanonicalHour> {
        canonical_hour(&self.config, &self.components_at(world_time))
    }

    pub fn week_at(&self, world_time: i64) -> Option<WeekInfo> {
        self.week(&self.components_at(world_time))
    }

    pub fn cycle_values_at(&self, world_time: i64) -> CycleValues {
        self.cycle_values(&self.components_at(world_time))
    }

    pub fn daylight_at(&self, world_time: i64) -> DaylightTimes {
        self.daylight(&self.components_at(world_time))
    }

    pub fn festival_at(&self, world_time: i64) -> Option<&Festival> {
        find_festival_day(&self.config, &self.components_at(world_time))
    }

    pub fn format_at(&self, world_time: i64, template: &str) -> String {
        self.format(&self.components_at(world_time), template)
    }

    pub fn format_named_at(&self, world_time: i64, name: &str) -> String {
        self.format_named(&self.components_at(world_time), name)
    }
}
