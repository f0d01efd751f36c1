use std::fmt;
use std::str::FromStr;

use crate::error::ParseDurationError;

/// The editable minutes/seconds pair.
///
/// Seconds are always kept in 0..=59; incrementing past :59 carries into
/// minutes. Decrementing seconds at :00 does NOT borrow from minutes --
/// asymmetric with the carry on increment, but intentional: it matches the
/// established behavior of the edit surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationSetting {
    minutes: u32,
    seconds: u32,
}

impl DurationSetting {
    /// Create a setting, rejecting seconds outside 0..=59.
    pub fn new(minutes: u32, seconds: u32) -> Result<Self, ParseDurationError> {
        if seconds > 59 {
            return Err(ParseDurationError::SecondsOutOfRange(seconds));
        }
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Total duration in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes)
            .saturating_mul(60)
            .saturating_add(u64::from(self.seconds))
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    pub fn increment_minutes(&mut self) {
        self.minutes = self.minutes.saturating_add(1);
    }

    /// Floor at zero, never negative.
    pub fn decrement_minutes(&mut self) {
        self.minutes = self.minutes.saturating_sub(1);
    }

    /// Carries into minutes at :59.
    pub fn increment_seconds(&mut self) {
        if self.seconds == 59 {
            self.seconds = 0;
            self.increment_minutes();
        } else {
            self.seconds += 1;
        }
    }

    /// No-op at :00 regardless of minutes (no borrow).
    pub fn decrement_seconds(&mut self) {
        self.seconds = self.seconds.saturating_sub(1);
    }
}

impl fmt::Display for DurationSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl FromStr for DurationSetting {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (minutes, seconds) = s
            .split_once(':')
            .ok_or_else(|| ParseDurationError::Format(s.to_string()))?;
        Self::new(minutes.trim().parse()?, seconds.trim().parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sixty_second_increments_carry_once() {
        let mut d = DurationSetting::default();
        for _ in 0..60 {
            d.increment_seconds();
        }
        assert_eq!(d.minutes(), 1);
        assert_eq!(d.seconds(), 0);
    }

    #[test]
    fn one_hundred_twenty_five_increments() {
        let mut d = DurationSetting::default();
        for _ in 0..125 {
            d.increment_seconds();
        }
        assert_eq!(d.minutes(), 2);
        assert_eq!(d.seconds(), 5);
    }

    #[test]
    fn decrement_seconds_does_not_borrow() {
        let mut d = DurationSetting::new(3, 0).unwrap();
        d.decrement_seconds();
        assert_eq!(d.minutes(), 3);
        assert_eq!(d.seconds(), 0);
    }

    #[test]
    fn decrement_minutes_floors_at_zero() {
        let mut d = DurationSetting::default();
        d.decrement_minutes();
        assert_eq!(d.minutes(), 0);
    }

    #[test]
    fn total_seconds() {
        let d = DurationSetting::new(2, 5).unwrap();
        assert_eq!(d.total_seconds(), 125);
    }

    #[test]
    fn parses_mm_ss() {
        let d: DurationSetting = "01:30".parse().unwrap();
        assert_eq!(d.minutes(), 1);
        assert_eq!(d.seconds(), 30);
    }

    #[test]
    fn rejects_seconds_over_59() {
        assert!("0:75".parse::<DurationSetting>().is_err());
    }

    #[test]
    fn rejects_missing_colon() {
        assert!("90".parse::<DurationSetting>().is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("a:b".parse::<DurationSetting>().is_err());
    }

    #[test]
    fn display_pads_to_two_digits() {
        let d = DurationSetting::new(1, 5).unwrap();
        assert_eq!(d.to_string(), "01:05");
    }

    proptest! {
        #[test]
        fn increments_keep_seconds_normalized(n in 0usize..500) {
            let mut d = DurationSetting::default();
            for _ in 0..n {
                d.increment_seconds();
            }
            prop_assert!(d.seconds() <= 59);
            prop_assert_eq!(d.total_seconds(), n as u64);
        }
    }
}
