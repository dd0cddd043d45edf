//! Leap-year rules: none, every-N-years, and ordered divisor patterns.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::{CalendarConfig, LeapRuleKind};
use crate::consts::{GREGORIAN_PATTERN, PATTERN_NEGATION, PATTERN_SEPARATOR};

/// Error type for leap pattern parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeapPatternError {
    /// Pattern string had no tokens.
    #[error("Empty leap pattern")]
    Empty,

    /// A token was not an optionally negated positive integer.
    #[error("Invalid leap pattern token: {0:?}")]
    InvalidToken(String),
}

/// One divisor of a leap pattern. `leap` is false for `!`-prefixed tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternToken {
    pub divisor: i64,
    pub leap:    bool,
}

/// An ordered divisor cascade, most specific first (e.g. `400,!100,4`).
///
/// The first token whose divisor divides the year decides the result; a year
/// no token divides is not a leap year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeapPattern {
    tokens: Vec<PatternToken>,
}

impl LeapPattern {
    /// The `400,!100,4` cascade
    pub fn gregorian() -> Self {
        Self {
            tokens: vec![
                PatternToken { divisor: 400, leap: true },
                PatternToken { divisor: 100, leap: false },
                PatternToken { divisor: 4, leap: true },
            ],
        }
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn is_leap(&self, year: i64) -> bool {
        self.tokens
            .iter()
            .find(|t| year.rem_euclid(t.divisor) == 0)
            .is_some_and(|t| t.leap)
    }

    /// Leap years in `[start, end)`, without visiting each year.
    ///
    /// A year is counted under the first token dividing it. For each leap
    /// token that is the number of its multiples divisible by no earlier
    /// divisor, found by inclusion-exclusion over the earlier divisors.
    /// Year 0 is divisible by every token and is counted on its own.
    pub fn count_leap_years(&self, start: i64, end: i64) -> i64 {
        if end <= start {
            return 0;
        }
        let limit = start.unsigned_abs().max((end - 1).unsigned_abs()).min(i64::MAX as u64) as i64;
        let zero = i64::from(start <= 0 && 0 < end && self.tokens.first().is_some_and(|t| t.leap));

        let mut earlier: Vec<i64> = Vec::new();
        let mut total = zero;
        for token in &self.tokens {
            // a multiple of an earlier divisor can never match first
            if earlier.iter().any(|d| token.divisor % d == 0) {
                continue;
            }
            if token.leap && token.divisor <= limit {
                total += exclusion_count(token.divisor, 1, &earlier, start, end, limit);
            }
            earlier.retain(|d| d % token.divisor != 0);
            earlier.push(token.divisor);
        }
        total
    }
}

/// Signed inclusion-exclusion over `excluded`, counting nonzero multiples of
/// `divisor` in `[start, end)`. Terms whose lcm exceeds `limit` have no
/// nonzero multiples in range and are pruned.
fn exclusion_count(divisor: i64, sign: i64, excluded: &[i64], start: i64, end: i64, limit: i64) -> i64 {
    let zero_in_range = i64::from(start <= 0 && 0 < end);
    let mut total = sign * (multiples_in(divisor, start, end) - zero_in_range);
    for (i, &other) in excluded.iter().enumerate() {
        if let Some(next) = lcm(divisor, other).filter(|&m| m <= limit) {
            total += exclusion_count(next, -sign, &excluded[i + 1..], start, end, limit);
        }
    }
    total
}

/// Multiples of a positive `divisor` in `[start, end)`
pub(crate) const fn multiples_in(divisor: i64, start: i64, end: i64) -> i64 {
    ceil_div(end, divisor) - ceil_div(start, divisor)
}

const fn ceil_div(value: i64, divisor: i64) -> i64 {
    value.div_euclid(divisor) + (value.rem_euclid(divisor) != 0) as i64
}

const fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: i64, b: i64) -> Option<i64> {
    (a / gcd(a, b)).checked_mul(b)
}

impl FromStr for LeapPattern {
    type Err = LeapPatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LeapPatternError::Empty);
        }

        let tokens = trimmed
            .split(PATTERN_SEPARATOR)
            .map(|raw| {
                let token = raw.trim();
                let (leap, digits) = match token.strip_prefix(PATTERN_NEGATION) {
                    Some(rest) => (false, rest.trim()),
                    None => (true, token),
                };
                match digits.parse::<i64>() {
                    Ok(divisor) if divisor > 0 => Ok(PatternToken { divisor, leap }),
                    _ => Err(LeapPatternError::InvalidToken(token.to_owned())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tokens })
    }
}

impl fmt::Display for LeapPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATTERN_SEPARATOR}")?;
            }
            if !token.leap {
                write!(f, "{PATTERN_NEGATION}")?;
            }
            write!(f, "{}", token.divisor)?;
        }
        Ok(())
    }
}

/// The leap rule a calendar resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeapRule {
    #[default]
    None,
    /// Leap when `(year - start) mod interval == 0`
    Simple { interval: i64, start: i64 },
    Pattern(LeapPattern),
}

impl LeapRule {
    /// Resolves the effective rule. `leapYearConfig` wins over the legacy
    /// `years.leapYear` unless its rule is `none`. Malformed settings
    /// resolve to [`LeapRule::None`].
    pub fn from_config(config: &CalendarConfig) -> Self {
        if let Some(leap) = config.leap_year_config.as_ref().filter(|l| l.rule != LeapRuleKind::None) {
            return match leap.rule {
                LeapRuleKind::Simple => Self::simple(leap.interval.unwrap_or(0), leap.start.unwrap_or(0)),
                LeapRuleKind::Gregorian => Self::pattern(GREGORIAN_PATTERN),
                LeapRuleKind::Pattern => Self::pattern(leap.pattern.as_deref().unwrap_or_default()),
                LeapRuleKind::None => Self::None,
            };
        }

        config
            .years
            .leap_year
            .map_or(Self::None, |legacy| Self::simple(legacy.interval, legacy.start))
    }

    fn simple(interval: i64, start: i64) -> Self {
        if interval > 0 {
            Self::Simple { interval, start }
        } else {
            debug!(interval, "non-positive leap interval, treating as no leap years");
            Self::None
        }
    }

    fn pattern(pattern: &str) -> Self {
        match pattern.parse::<LeapPattern>() {
            Ok(parsed) => Self::Pattern(parsed),
            Err(error) => {
                debug!(%error, pattern, "malformed leap pattern, treating as no leap years");
                Self::None
            }
        }
    }

    pub fn is_leap(&self, year: i64) -> bool {
        match self {
            Self::None => false,
            Self::Simple { interval, start } => (year - start).rem_euclid(*interval) == 0,
            Self::Pattern(pattern) => pattern.is_leap(year),
        }
    }

    /// Leap years in `[start, end)`
    pub fn count_leap_years(&self, start: i64, end: i64) -> i64 {
        if end <= start {
            return 0;
        }
        match self {
            Self::None => 0,
            Self::Simple { interval, start: first } => {
                multiples_in(*interval, start.saturating_sub(*first), end.saturating_sub(*first))
            }
            Self::Pattern(pattern) => pattern.count_leap_years(start, end),
        }
    }

    /// Sum over the years `[start, end)` of a per-year amount that differs
    /// between common and leap years. Negative when `end < start`.
    pub(crate) fn total_over_years(&self, start: i64, end: i64, common: i64, leap: i64) -> i64 {
        if end < start {
            return -self.total_over_years(end, start, common, leap);
        }
        (end - start) * common + self.count_leap_years(start, end) * (leap - common)
    }
}

/// Whether `display_year` is a leap year under the calendar's rule
pub fn is_leap_year(config: &CalendarConfig, display_year: i64) -> bool {
    LeapRule::from_config(config).is_leap(display_year)
}
