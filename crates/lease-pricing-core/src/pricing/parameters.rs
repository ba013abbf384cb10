//! Pricing inputs: the per-session parameter set and the candidate PV entries.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Days, Money};

/// Average month length used to convert daily rates into monthly totals.
pub const DEFAULT_DAYS_PER_MONTH: Days = dec!(30.5);

fn default_days_per_month() -> Days {
    DEFAULT_DAYS_PER_MONTH
}

/// Parameters shared by every row of one pricing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingParameters {
    /// Reference market price of the car
    pub car_price: Money,
    /// Refundable deposit quoted alongside each PV
    #[serde(default)]
    pub deposit: Money,
    /// Daily rate (over-15 tier) when the client puts no money down
    pub rate_at_zero: Money,
    /// Daily surcharge applied for rentals of 15 days or fewer
    #[serde(default)]
    pub under15_diff: Money,
    /// Days per month (default 30.5)
    #[serde(default = "default_days_per_month")]
    pub days_per_month: Days,
    /// Contract term in months
    pub term_months: u32,
}

impl PricingParameters {
    /// Total number of rental days covered by the contract.
    pub fn contract_days(&self) -> Days {
        self.days_per_month.saturating_mul(Decimal::from(self.term_months))
    }
}

/// A single candidate down-payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvEntry {
    /// Caller-assigned identifier, unique and increasing within a session
    pub id: u32,
    /// Down-payment amount
    pub amount: Money,
}

impl PvEntry {
    pub fn new(id: u32, amount: Money) -> Self {
        Self { id, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_per_month_defaults_when_omitted() {
        let json = r#"{
            "car_price": "6500000",
            "rate_at_zero": 3900,
            "term_months": 55
        }"#;
        let params: PricingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.days_per_month, dec!(30.5));
        assert_eq!(params.deposit, Decimal::ZERO);
        assert_eq!(params.under15_diff, Decimal::ZERO);
    }

    #[test]
    fn test_contract_days() {
        let params = PricingParameters {
            car_price: dec!(6_500_000),
            deposit: dec!(30_000),
            rate_at_zero: dec!(3900),
            under15_diff: dec!(200),
            days_per_month: dec!(30.5),
            term_months: 55,
        };
        assert_eq!(params.contract_days(), dec!(1677.5));
    }
}
