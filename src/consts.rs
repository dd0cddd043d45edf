/// Weekday cycle length used when a calendar declares no weekdays
pub const DEFAULT_WEEK_LENGTH: usize = 7;

/// Default day units, applied when a config omits its `days` block
pub const DEFAULT_HOURS_PER_DAY: u32 = 24;
/// Default minutes per hour
pub const DEFAULT_MINUTES_PER_HOUR: u32 = 60;
/// Default seconds per minute
pub const DEFAULT_SECONDS_PER_MINUTE: u32 = 60;
/// Default nominal year length in days
pub const DEFAULT_DAYS_PER_YEAR: u32 = 365;

/// Divisor pattern equivalent to the Gregorian leap rule
pub const GREGORIAN_PATTERN: &str = "400,!100,4";
/// Separator between divisor tokens in a leap pattern
pub const PATTERN_SEPARATOR: char = ',';
/// Prefix marking a divisor token as "not leap"
pub const PATTERN_NEGATION: char = '!';

/// Phase count for which the primary/secondary day split applies
pub const STANDARD_PHASE_COUNT: usize = 8;
/// Indices of the primary phases (new and full) in a standard moon
pub const PRIMARY_PHASES: [usize; 2] = [0, 4];
/// Slack allowed where adjacent phase bounds must meet
pub const PHASE_BOUND_TOLERANCE: f64 = 1e-9;
/// Label prefixes for generated sub-phase names
pub const RISING_PREFIX: &str = "Rising";
/// Label prefix for the last third of a phase
pub const FADING_PREFIX: &str = "Fading";

/// Season progress at or below which a date counts as "Early"
pub const EARLY_SEASON_MAX: f64 = 0.33;
/// Season progress at or above which a date counts as "Late"
pub const LATE_SEASON_MIN: f64 = 0.66;

/// Half-width of the sunrise/sunset band, in day progress
pub(crate) const DAY_EDGE_BAND: f64 = 0.04;
/// Half-width of the noon band, in day progress
pub(crate) const NOON_BAND: f64 = 0.04;
/// Day progress at which afternoon gives way to evening
pub(crate) const EVENING_START: f64 = 0.8;
/// Width of the dusk/dawn bands, in night progress
pub(crate) const NIGHT_EDGE_BAND: f64 = 0.06;
/// Half-width of the midnight band, in night progress
pub(crate) const MIDNIGHT_BAND: f64 = 0.04;

/// Placeholder replaced with the era-relative year in era templates
pub const ERA_YEAR_IN_ERA: &str = "{{yearInEra}}";
/// Placeholder replaced with the display year in era templates
pub const ERA_YEAR: &str = "{{year}}";
/// Placeholder replaced with the era abbreviation in era templates
pub const ERA_ABBREVIATION: &str = "{{abbreviation}}";
/// Placeholder replaced with the era name in era templates
pub const ERA_NAME: &str = "{{era}}";

/// Escaped line break accepted in cycle templates
pub const CYCLE_LINE_BREAK: &str = "\\n";
