//! Bounded numeric entry.

/// Inclusive range for a numeric field.
///
/// Stepping and direct entry both clamp into `[min, max]`. The bounds are
/// computed fresh for every render, so a "correct" stepper's `max` follows
/// its paired total without rewriting a value that was entered earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    pub min: u32,
    pub max: u32,
}

impl Default for Stepper {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl Stepper {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Default range with a different upper bound.
    pub fn up_to(max: u32) -> Self {
        Self { min: 0, max }
    }

    pub fn increment(&self, value: u32) -> u32 {
        value.saturating_add(1).min(self.max)
    }

    pub fn decrement(&self, value: u32) -> u32 {
        value.saturating_sub(1).max(self.min)
    }

    /// Direct entry: the leading integer of `text`, or 0, clamped.
    pub fn enter(&self, text: &str) -> u32 {
        self.clamp(parse_leading_int(text).unwrap_or(0))
    }

    /// Clamp into range. `max` wins when the bounds cross.
    pub fn clamp(&self, value: i64) -> u32 {
        let clamped = value.max(i64::from(self.min)).min(i64::from(self.max));
        u32::try_from(clamped).unwrap_or(self.min)
    }
}

/// Leading integer of `text`: optional whitespace and sign, then digits.
///
/// `"12abc"` is 12, `"  -3"` is -3, `"abc"` and `""` are `None`. Values
/// beyond `i64` saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &digits[..digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_step_holds_at_bounds() {
        let s = Stepper::default();
        assert_eq!(s.decrement(0), 0);
        assert_eq!(s.increment(100), 100);
        assert_eq!(s.increment(41), 42);
        assert_eq!(s.decrement(42), 41);
    }

    #[test]
    fn test_entry_non_numeric_is_zero() {
        let s = Stepper::default();
        assert_eq!(s.enter("abc"), 0);
        assert_eq!(s.enter(""), 0);
        assert_eq!(Stepper::new(5, 10).enter("x"), 5);
    }

    #[test]
    fn test_entry_parses_leading_integer() {
        let s = Stepper::default();
        assert_eq!(s.enter("12abc"), 12);
        assert_eq!(s.enter(" 7"), 7);
        assert_eq!(s.enter("3.9"), 3);
        assert_eq!(s.enter("-4"), 0);
        assert_eq!(s.enter("250"), 100);
        assert_eq!(s.enter("99999999999999999999999"), 100);
    }

    #[test]
    fn test_dynamic_cap_is_not_retroactive() {
        // correct = 6 entered while total was 7; total later lowered to 4
        let correct = 6;
        let cap = Stepper::up_to(4);
        // stepping up clamps; stepping down only moves by one
        assert_eq!(cap.increment(correct), 4);
        assert_eq!(cap.decrement(correct), 5);
        assert_eq!(cap.enter("6"), 4);
    }

    #[test]
    fn test_zero_max_pins_to_zero() {
        let s = Stepper::up_to(0);
        assert_eq!(s.increment(0), 0);
        assert_eq!(s.enter("5"), 0);
    }

    proptest! {
        #[test]
        fn prop_entry_in_range(text in ".*", min in 0u32..50, span in 0u32..100) {
            let s = Stepper::new(min, min + span);
            let v = s.enter(&text);
            prop_assert!(v >= s.min && v <= s.max);
        }

        #[test]
        fn prop_steps_in_range(value in 0u32..200, max in 0u32..150) {
            let s = Stepper::up_to(max);
            let start = value.min(max);
            prop_assert!(s.increment(start) <= max);
            prop_assert!(s.decrement(start) <= max);
        }
    }
}
