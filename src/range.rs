use crate::prelude::*;

/// A range over a cyclic domain (days of a year, hours of a day).
///
/// When `start > end` the range wraps past the end of the period back to 0,
/// so `355..79` covers the turn of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}..{}", start, end)]
pub struct WrappingRange {
    start: u32,
    end:   u32,
}

impl WrappingRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> u32 {
        self.start
    }

    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Whether the range crosses the period boundary
    #[inline]
    pub const fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Membership with both bounds included
    pub const fn contains_inclusive(&self, value: u32) -> bool {
        if self.wraps() {
            value >= self.start || value <= self.end
        } else {
            self.start <= value && value <= self.end
        }
    }

    /// Membership with the end bound excluded
    pub const fn contains_half_open(&self, value: u32) -> bool {
        if self.wraps() {
            value >= self.start || value < self.end
        } else {
            self.start <= value && value < self.end
        }
    }

    /// Number of values covered with both bounds included, over a period of `period`
    pub const fn span_inclusive(&self, period: u32) -> u32 {
        if self.wraps() {
            period.saturating_sub(self.start) + self.end + 1
        } else {
            self.end - self.start + 1
        }
    }

    /// Distance from `start` to `value`, walking forward and wrapping at `period`
    pub const fn offset_of(&self, value: u32, period: u32) -> u32 {
        if value >= self.start {
            value - self.start
        } else {
            period.saturating_sub(self.start) + value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive_cases() {
        struct TestCase {
            start:       u32,
            end:         u32,
            value:       u32,
            expected:    bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                start:       355,
                end:         79,
                value:       10,
                expected:    true,
                description: "wrapped range, early in year",
            },
            TestCase {
                start:       355,
                end:         79,
                value:       360,
                expected:    true,
                description: "wrapped range, late in year",
            },
            TestCase {
                start:       355,
                end:         79,
                value:       200,
                expected:    false,
                description: "wrapped range, midyear",
            },
            TestCase {
                start:       80,
                end:         171,
                value:       171,
                expected:    true,
                description: "end bound included",
            },
            TestCase {
                start:       80,
                end:         171,
                value:       79,
                expected:    false,
                description: "just before start",
            },
            TestCase {
                start:       5,
                end:         5,
                value:       5,
                expected:    true,
                description: "single-value range",
            },
        ];

        for case in &cases {
            let range = WrappingRange::new(case.start, case.end);
            assert_eq!(
                range.contains_inclusive(case.value),
                case.expected,
                "{} ({range} contains {})",
                case.description,
                case.value
            );
        }
    }

    #[test]
    fn test_contains_half_open() {
        let night = WrappingRange::new(22, 2);
        assert!(night.contains_half_open(23));
        assert!(night.contains_half_open(1));
        assert!(night.contains_half_open(22));
        assert!(!night.contains_half_open(2));
        assert!(!night.contains_half_open(10));

        let morning = WrappingRange::new(6, 9);
        assert!(morning.contains_half_open(6));
        assert!(!morning.contains_half_open(9));
    }

    #[test]
    fn test_span_and_offset() {
        let winter = WrappingRange::new(355, 79);
        assert_eq!(winter.span_inclusive(365), 90);
        assert_eq!(winter.offset_of(355, 365), 0);
        assert_eq!(winter.offset_of(0, 365), 10);
        assert_eq!(winter.offset_of(79, 365), 89);

        let spring = WrappingRange::new(80, 171);
        assert_eq!(spring.span_inclusive(365), 92);
        assert_eq!(spring.offset_of(100, 365), 20);
    }

    #[test]
    fn test_display() {
        assert_eq!(WrappingRange::new(22, 2).to_string(), "22..2");
        assert!(WrappingRange::new(22, 2).wraps());
        assert!(!WrappingRange::new(2, 22).wraps());
    }
}
