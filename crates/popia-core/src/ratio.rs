//! # Rounded Percentages
//!
//! Both the questionnaire score and the contact-list compliance figure are
//! whole percentages rounded half-up. An empty denominator yields 0 rather
//! than an error or a NaN.

/// Compute `round(numerator / denominator × 100)` with half-up rounding,
/// clamped to 100.
///
/// Returns 0 when `denominator` is 0.
pub fn rounded_percent(numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let scaled = numerator
        .saturating_mul(200)
        .saturating_add(denominator)
        / denominator.saturating_mul(2);
    scaled.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_denominator_is_zero() {
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(rounded_percent(5, 0), 0);
    }

    #[test]
    fn test_exact_values() {
        assert_eq!(rounded_percent(12, 12), 100);
        assert_eq!(rounded_percent(6, 12), 50);
        assert_eq!(rounded_percent(0, 12), 0);
        assert_eq!(rounded_percent(3, 12), 25);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(rounded_percent(1, 8), 13);
        // 1/12 = 8.33%
        assert_eq!(rounded_percent(1, 12), 8);
        // 2/3 = 66.67%
        assert_eq!(rounded_percent(2, 3), 67);
        // 10/12 = 83.33%
        assert_eq!(rounded_percent(10, 12), 83);
    }

    proptest! {
        #[test]
        fn rounded_percent_bounded(den in 1u64..10_000, frac in 0.0f64..=1.0) {
            let num = ((den as f64) * frac).floor() as u64;
            let pct = rounded_percent(num, den);
            prop_assert!(pct <= 100);
        }

        #[test]
        fn rounded_percent_monotonic(den in 1u64..1_000, a in 0u64..1_000, b in 0u64..1_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo = lo.min(den);
            let hi = hi.min(den);
            prop_assert!(rounded_percent(lo, den) <= rounded_percent(hi, den));
        }
    }
}
