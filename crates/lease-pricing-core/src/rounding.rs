//! Rounding helpers shared by the pricing engine and the quote builder.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Round to the nearest integer, ties toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`. Currency totals are always rounded this way.
/// Values within half a unit of `Decimal::MAX` saturate instead of overflowing.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.saturating_add(dec!(0.5)).floor()
}

/// Round `value` up to the next multiple of `step`.
///
/// Exact multiples are returned unchanged. A zero `step` leaves the value as is.
/// Returns `None` when the next multiple is not representable.
pub fn ceil_to_step(value: Decimal, step: Decimal) -> Option<Decimal> {
    if step.is_zero() {
        return Some(value);
    }
    value.checked_div(step)?.ceil().checked_mul(step)
}

/// `numerator / denominator`, or `None` when the denominator is zero or the
/// quotient overflows.
pub fn checked_ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator.checked_div(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(round_half_up(dec!(2.5)), dec!(3));
        assert_eq!(round_half_up(dec!(2.4999)), dec!(2));
        assert_eq!(round_half_up(dec!(-2.5)), dec!(-2));
        assert_eq!(round_half_up(dec!(-2.51)), dec!(-3));
    }

    #[test]
    fn test_round_half_up_integer_unchanged() {
        assert_eq!(round_half_up(dec!(6543750)), dec!(6543750));
    }

    #[test]
    fn test_round_half_up_saturates_at_max() {
        assert_eq!(round_half_up(Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_ceil_to_step_rounds_up() {
        assert_eq!(ceil_to_step(dec!(2827.87), dec!(50)), Some(dec!(2850)));
        assert_eq!(ceil_to_step(dec!(2800.01), dec!(50)), Some(dec!(2850)));
        assert_eq!(ceil_to_step(dec!(0.01), dec!(50)), Some(dec!(50)));
    }

    #[test]
    fn test_ceil_to_step_exact_multiple() {
        assert_eq!(ceil_to_step(dec!(3050), dec!(50)), Some(dec!(3050)));
        assert_eq!(ceil_to_step(dec!(0), dec!(50)), Some(dec!(0)));
    }

    #[test]
    fn test_ceil_to_step_zero_step() {
        assert_eq!(ceil_to_step(dec!(12.3), Decimal::ZERO), Some(dec!(12.3)));
    }

    #[test]
    fn test_ceil_to_step_past_max_is_none() {
        // MAX / 50 ends in .7, so the next multiple of 50 lies above MAX
        assert_eq!(ceil_to_step(Decimal::MAX, dec!(50)), None);
    }

    #[test]
    fn test_checked_ratio_zero_denominator() {
        assert_eq!(checked_ratio(dec!(10), Decimal::ZERO), None);
        assert_eq!(checked_ratio(dec!(10), dec!(4)), Some(dec!(2.5)));
        assert_eq!(checked_ratio(Decimal::MAX, Decimal::new(1, 2)), None);
    }
}
