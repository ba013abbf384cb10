//! Pricing engine: derives one calculation row from the session parameters and a PV.
//!
//! The buyout is the primary quantity. Daily rates are derived backward from
//! the final buyout and then rounded up to the rate step, so a rounded rate
//! never under-recovers the buyout it was derived from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::classification::{classify, MarketStatus};
use super::parameters::{PricingParameters, PvEntry};
use crate::rounding::{ceil_to_step, checked_ratio, round_half_up};
use crate::types::{Days, Money, Percent};

/// Each unit of down-payment reduces the buyout by this many units.
pub const PV_MULTIPLIER: Decimal = dec!(1.8);

/// Daily rates are quoted in multiples of this amount.
pub const RATE_STEP: Money = dec!(50);

const HUNDRED: Decimal = dec!(100);

/// A fully derived pricing row for one PV amount.
///
/// Rate fields are `None` when no representable rate exists: the contract
/// length (days per month times months) is zero, or a rate overflows
/// `Decimal`. Totals that overflow saturate at `Decimal::MAX` or `Decimal::MIN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRow {
    /// Identifier of the PV entry this row was priced from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pv_id: Option<u32>,
    /// Down-payment amount
    pub pv: Money,
    /// Buyout at zero down-payment
    pub base_buyout: Money,
    /// Total buyout after the down-payment reduction, floored at zero
    pub total_buyout: Money,
    /// Unrounded daily rate for rentals over 15 days
    pub rate_over15: Option<Money>,
    /// Over-15 rate rounded up to the rate step
    pub rate_over15_rounded: Option<Money>,
    /// Rounded over-15 rate plus the under-15 surcharge
    pub rate_under15: Option<Money>,
    /// Under-15 rate rounded up to the rate step
    pub rate_under15_rounded: Option<Money>,
    /// Half of the total buyout
    pub market_check: Money,
    /// Total buyout as a percentage of the car price (0 when no car price)
    pub percent_from_car_price: Percent,
    pub status: MarketStatus,
}

/// Price a single PV amount.
///
/// Never fails or panics: zero or negative PV, days per month or term are a
/// caller contract and flow through the formulas unguarded, and out-of-range
/// magnitudes saturate the totals rather than overflow.
pub fn compute_row(
    pv: Money,
    rate_at_zero: Money,
    under15_diff: Money,
    days_per_month: Days,
    term_months: u32,
    car_price: Money,
) -> CalculationRow {
    let months = Decimal::from(term_months);
    let contract_days = days_per_month.checked_mul(months);

    let base_buyout =
        round_half_up(rate_at_zero.saturating_mul(days_per_month.saturating_mul(months)));
    let reduction = pv.saturating_mul(PV_MULTIPLIER);
    let total_buyout = round_half_up(base_buyout.saturating_sub(reduction)).max(Decimal::ZERO);

    let rate_over15 = contract_days.and_then(|days| checked_ratio(total_buyout, days));
    let rate_over15_rounded = rate_over15.and_then(|r| ceil_to_step(r, RATE_STEP));
    let rate_under15 = rate_over15_rounded.and_then(|r| r.checked_add(under15_diff));
    let rate_under15_rounded = rate_under15.and_then(|r| ceil_to_step(r, RATE_STEP));

    let market_check = round_half_up(total_buyout / dec!(2));

    let percent_from_car_price = if car_price > Decimal::ZERO {
        percent_of(total_buyout, car_price)
    } else {
        Decimal::ZERO
    };

    CalculationRow {
        pv_id: None,
        pv,
        base_buyout,
        total_buyout,
        rate_over15,
        rate_over15_rounded,
        rate_under15,
        rate_under15_rounded,
        market_check,
        percent_from_car_price,
        status: classify(percent_from_car_price),
    }
}

/// `part * 100 / whole` for a non-negative `part` and positive `whole`.
///
/// Multiplying first keeps boundary percentages exact. When that overflows the
/// ratio is taken first, and a ratio past `Decimal::MAX` saturates there.
fn percent_of(part: Money, whole: Money) -> Percent {
    part.checked_mul(HUNDRED)
        .and_then(|scaled| checked_ratio(scaled, whole))
        .unwrap_or_else(|| {
            checked_ratio(part, whole).map_or(Decimal::MAX, |ratio| ratio.saturating_mul(HUNDRED))
        })
}

/// Price a PV entry against a parameter set, tagging the row with the entry id.
pub fn compute_row_for(params: &PricingParameters, entry: &PvEntry) -> CalculationRow {
    CalculationRow {
        pv_id: Some(entry.id),
        ..compute_row(
            entry.amount,
            params.rate_at_zero,
            params.under15_diff,
            params.days_per_month,
            params.term_months,
            params.car_price,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn reference_params() -> PricingParameters {
        PricingParameters {
            car_price: dec!(6_500_000),
            deposit: dec!(30_000),
            rate_at_zero: dec!(3900),
            under15_diff: dec!(200),
            days_per_month: dec!(30.5),
            term_months: 55,
        }
    }

    #[test]
    fn test_zero_pv_row() {
        let row = compute_row_for(&reference_params(), &PvEntry::new(1, Decimal::ZERO));

        // 3900 * 30.5 * 55
        assert_eq!(row.base_buyout, dec!(6_542_250));
        assert_eq!(row.total_buyout, dec!(6_542_250));
        assert_eq!(row.rate_over15, Some(dec!(3900)));
        assert_eq!(row.rate_over15_rounded, Some(dec!(3900)));
        assert_eq!(row.rate_under15, Some(dec!(4100)));
        assert_eq!(row.rate_under15_rounded, Some(dec!(4100)));
        assert_eq!(row.market_check, dec!(3_271_125));
        assert!((row.percent_from_car_price - dec!(100.65)).abs() < dec!(0.01));
        assert_eq!(row.status, MarketStatus::Good);
        assert_eq!(row.pv_id, Some(1));
    }

    #[test]
    fn test_one_million_pv_row() {
        let row = compute_row_for(&reference_params(), &PvEntry::new(2, dec!(1_000_000)));

        assert_eq!(row.total_buyout, dec!(4_742_250));
        let raw = row.rate_over15.unwrap();
        assert!((raw - dec!(2826.97)).abs() < dec!(0.01));
        assert_eq!(row.rate_over15_rounded, Some(dec!(2850)));
        assert_eq!(row.rate_under15, Some(dec!(3050)));
        assert_eq!(row.rate_under15_rounded, Some(dec!(3050)));
        assert_eq!(row.market_check, dec!(2_371_125));
        // 4_742_250 / 6_500_000 ≈ 72.96%, below the warning band
        assert_eq!(row.status, MarketStatus::Bad);
    }

    #[test]
    fn test_buyout_floored_at_zero() {
        let row = compute_row_for(&reference_params(), &PvEntry::new(3, dec!(4_000_000)));
        assert_eq!(row.total_buyout, Decimal::ZERO);
        assert_eq!(row.rate_over15_rounded, Some(Decimal::ZERO));
        // Surcharge alone, already a multiple of the step
        assert_eq!(row.rate_under15_rounded, Some(dec!(200)));
        assert_eq!(row.market_check, Decimal::ZERO);
        assert_eq!(row.percent_from_car_price, Decimal::ZERO);
        assert_eq!(row.status, MarketStatus::Bad);
    }

    #[test]
    fn test_buyout_rounds_half_up() {
        // 6_542_250 - 2.5 * 1.8 = 6_542_245.5
        let row = compute_row_for(&reference_params(), &PvEntry::new(4, dec!(2.5)));
        assert_eq!(row.total_buyout, dec!(6_542_246));
    }

    #[test]
    fn test_base_buyout_rounds_half_up() {
        // 0.01 * 30.5 * 1 = 0.305 -> 0; 0.02 * 30.5 = 0.61 -> 1
        let low = compute_row(Decimal::ZERO, dec!(0.01), Decimal::ZERO, dec!(30.5), 1, dec!(1));
        let high = compute_row(Decimal::ZERO, dec!(0.02), Decimal::ZERO, dec!(30.5), 1, dec!(1));
        assert_eq!(low.base_buyout, Decimal::ZERO);
        assert_eq!(high.base_buyout, dec!(1));
    }

    #[test]
    fn test_under15_rate_rounded_again() {
        let row = compute_row(
            dec!(1_000_000),
            dec!(3900),
            dec!(120),
            dec!(30.5),
            55,
            dec!(6_500_000),
        );
        // 2850 + 120 = 2970 -> 3000
        assert_eq!(row.rate_under15, Some(dec!(2970)));
        assert_eq!(row.rate_under15_rounded, Some(dec!(3000)));
    }

    #[test]
    fn test_negative_pv_increases_buyout() {
        let row = compute_row_for(&reference_params(), &PvEntry::new(5, dec!(-100_000)));
        assert_eq!(row.total_buyout, dec!(6_722_250));
    }

    #[test]
    fn test_zero_car_price_is_bad() {
        let mut params = reference_params();
        params.car_price = Decimal::ZERO;
        let row = compute_row_for(&params, &PvEntry::new(1, Decimal::ZERO));
        assert_eq!(row.percent_from_car_price, Decimal::ZERO);
        assert_eq!(row.status, MarketStatus::Bad);
    }

    #[test]
    fn test_zero_contract_days_yields_no_rates() {
        let mut params = reference_params();
        params.days_per_month = Decimal::ZERO;
        let row = compute_row_for(&params, &PvEntry::new(1, Decimal::ZERO));
        assert_eq!(row.base_buyout, Decimal::ZERO);
        assert_eq!(row.rate_over15, None);
        assert_eq!(row.rate_over15_rounded, None);
        assert_eq!(row.rate_under15, None);
        assert_eq!(row.rate_under15_rounded, None);
    }

    #[test]
    fn test_zero_term_yields_no_rates() {
        let mut params = reference_params();
        params.term_months = 0;
        let row = compute_row_for(&params, &PvEntry::new(1, dec!(10)));
        assert_eq!(row.total_buyout, Decimal::ZERO);
        assert_eq!(row.rate_over15_rounded, None);
    }

    #[test]
    fn test_compute_row_is_idempotent() {
        let params = reference_params();
        let entry = PvEntry::new(9, dec!(750_000));
        assert_eq!(compute_row_for(&params, &entry), compute_row_for(&params, &entry));
    }

    #[test]
    fn test_compute_row_has_no_id() {
        let row = compute_row(Decimal::ZERO, dec!(3900), dec!(200), dec!(30.5), 55, dec!(1));
        assert_eq!(row.pv_id, None);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("pv_id").is_none());
    }

    #[test]
    fn test_huge_rate_saturates_buyout() {
        // 1e27 * 1677.5 contract days is past Decimal::MAX
        let rate_at_zero = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let row = compute_row(Decimal::ZERO, rate_at_zero, Decimal::ZERO, dec!(30.5), 55, dec!(1));
        assert_eq!(row.base_buyout, Decimal::MAX);
        assert_eq!(row.total_buyout, Decimal::MAX);
        assert!(row.rate_over15.is_some());
        assert!(row.rate_over15_rounded.is_some());
        assert_eq!(row.percent_from_car_price, Decimal::MAX);
        assert_eq!(row.status, MarketStatus::Bad);
    }

    #[test]
    fn test_max_pv_floors_buyout() {
        let row = compute_row_for(&reference_params(), &PvEntry::new(1, Decimal::MAX));
        assert_eq!(row.base_buyout, dec!(6_542_250));
        assert_eq!(row.total_buyout, Decimal::ZERO);
        assert_eq!(row.rate_over15_rounded, Some(Decimal::ZERO));
        assert_eq!(row.rate_under15_rounded, Some(dec!(200)));
        assert_eq!(row.status, MarketStatus::Bad);
    }

    #[test]
    fn test_min_pv_saturates_buyout() {
        let row = compute_row_for(&reference_params(), &PvEntry::new(1, Decimal::MIN));
        assert_eq!(row.total_buyout, Decimal::MAX);
        assert_eq!(row.market_check, round_half_up(Decimal::MAX / dec!(2)));
        assert_eq!(row.status, MarketStatus::Bad);
    }

    #[test]
    fn test_rate_overflow_yields_no_rates() {
        // 1_800_000 spread over 1e-28 days has no representable daily rate
        let row = compute_row(
            dec!(-1_000_000),
            dec!(3900),
            Decimal::ZERO,
            Decimal::new(1, 28),
            1,
            dec!(6_500_000),
        );
        assert_eq!(row.total_buyout, dec!(1_800_000));
        assert_eq!(row.rate_over15, None);
        assert_eq!(row.rate_over15_rounded, None);
        assert_eq!(row.rate_under15, None);
        assert_eq!(row.rate_under15_rounded, None);
    }

    #[test]
    fn test_tiny_car_price_saturates_percent() {
        let row = compute_row_for(
            &PricingParameters {
                car_price: Decimal::new(1, 28),
                ..reference_params()
            },
            &PvEntry::new(1, Decimal::ZERO),
        );
        assert_eq!(row.percent_from_car_price, Decimal::MAX);
        assert_eq!(row.status, MarketStatus::Bad);
    }
}
