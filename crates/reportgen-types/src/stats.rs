//! Completion-rate arithmetic shared by the editor and the renderer.

/// A record that pairs an achieved count with the count it is measured
/// against (correct/total, earned/max, student/full mark).
pub trait Tally {
    fn achieved(&self) -> u32;
    fn possible(&self) -> u32;

    /// Rounded completion percentage; see [`completion_percent`].
    fn percent(&self) -> u32 {
        completion_percent(self.achieved(), self.possible())
    }
}

/// `round(100 × achieved / possible)`, or 0 when `possible` is 0.
///
/// Halves round away from zero. The result is not capped at 100: a stale
/// `achieved > possible` pair yields more, saturating at `u32::MAX`.
pub fn completion_percent(achieved: u32, possible: u32) -> u32 {
    if possible == 0 {
        return 0;
    }
    // Integer form of round(100a/p) with half-up rounding.
    let scaled = 200 * u64::from(achieved) + u64::from(possible);
    u32::try_from(scaled / (2 * u64::from(possible))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_total_is_zero_percent() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(5, 0), 0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(completion_percent(6, 7), 86);
        assert_eq!(completion_percent(2, 4), 50);
        assert_eq!(completion_percent(9, 9), 100);
        assert_eq!(completion_percent(13, 14), 93);
        assert_eq!(completion_percent(4, 6), 67);
    }

    #[test]
    fn test_half_rounds_up() {
        // 1/8 = 12.5%
        assert_eq!(completion_percent(1, 8), 13);
    }

    #[test]
    fn test_stale_pair_saturates() {
        assert_eq!(completion_percent(30, 10), 300);
        assert_eq!(completion_percent(u32::MAX, 1), u32::MAX);
        assert_eq!(completion_percent(u32::MAX, 2), u32::MAX);
        assert_eq!(completion_percent(u32::MAX, 100), u32::MAX);
        assert_eq!(completion_percent(u32::MAX, u32::MAX), 100);
    }

    proptest! {
        #[test]
        fn prop_matches_float_rounding(total in 1u32..10_000, correct_frac in 0.0f64..=1.0) {
            let correct = (f64::from(total) * correct_frac).floor() as u32;
            let expected = (100.0 * f64::from(correct) / f64::from(total)).round() as u32;
            prop_assert_eq!(completion_percent(correct, total), expected);
        }

        #[test]
        fn prop_in_range_when_capped(total in 0u32..10_000, correct in 0u32..10_000) {
            let correct = correct.min(total);
            prop_assert!(completion_percent(correct, total) <= 100);
        }
    }
}
