//! Pricing table: runs the engine over every PV entry of a session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use super::classification::MarketStatus;
use super::engine::{compute_row_for, CalculationRow, PV_MULTIPLIER, RATE_STEP};
use super::parameters::{PricingParameters, PvEntry};
use crate::types::{with_metadata, ComputationOutput};
use crate::LeasePricingResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTableInput {
    pub parameters: PricingParameters,
    pub entries: Vec<PvEntry>,
}

/// Row counts per market status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub good: usize,
    pub warning: usize,
    pub bad: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTable {
    /// One row per entry, in input order
    pub rows: Vec<CalculationRow>,
    pub tally: StatusTally,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price every PV entry of a session.
///
/// Contract violations (negative PV, zero term, ...) are reported as
/// warnings; rows are produced regardless.
pub fn price_table(
    input: &PricingTableInput,
) -> LeasePricingResult<ComputationOutput<PricingTable>> {
    let start = Instant::now();

    let warnings = contract_warnings(&input.parameters, &input.entries);
    for warning in &warnings {
        tracing::warn!(%warning, "pricing contract violation");
    }

    let rows = price_rows(&input.parameters, &input.entries);
    let tally = tally_statuses(&rows);

    tracing::debug!(
        rows = rows.len(),
        good = tally.good,
        warning = tally.warning,
        bad = tally.bad,
        "priced table"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "pv_multiplier": PV_MULTIPLIER.to_string(),
        "rate_step": RATE_STEP.to_string(),
        "days_per_month": input.parameters.days_per_month.to_string(),
        "rounding": "totals half-up to whole units, rates up to the rate step",
    });

    with_metadata(
        "Rent-to-own buyout pricing (rate derived from buyout)",
        &assumptions,
        warnings,
        elapsed,
        PricingTable { rows, tally },
    )
}

/// Price each entry in order. No row depends on another.
pub fn price_rows(params: &PricingParameters, entries: &[PvEntry]) -> Vec<CalculationRow> {
    entries
        .iter()
        .map(|entry| compute_row_for(params, entry))
        .collect()
}

pub fn tally_statuses(rows: &[CalculationRow]) -> StatusTally {
    rows.iter().fold(StatusTally::default(), |mut tally, row| {
        match row.status {
            MarketStatus::Good => tally.good += 1,
            MarketStatus::Warning => tally.warning += 1,
            MarketStatus::Bad => tally.bad += 1,
        }
        tally
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn contract_warnings(params: &PricingParameters, entries: &[PvEntry]) -> Vec<String> {
    let mut warnings = Vec::new();

    if params.days_per_month <= Decimal::ZERO {
        warnings.push(format!(
            "Days per month is {}; daily rates are undefined or negative.",
            params.days_per_month
        ));
    }
    if params.term_months == 0 {
        warnings.push("Term is zero months; daily rates are undefined.".into());
    }
    if params.rate_at_zero <= Decimal::ZERO {
        warnings.push("Base daily rate is non-positive; buyout will be zero.".into());
    }
    if params.car_price <= Decimal::ZERO {
        warnings.push("Car price is not set; every row is classified as bad.".into());
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut previous: Option<u32> = None;
    for entry in entries {
        if entry.amount < Decimal::ZERO {
            warnings.push(format!(
                "PV #{} is negative ({}); it increases the buyout.",
                entry.id, entry.amount
            ));
        }
        if !seen.insert(entry.id) {
            warnings.push(format!("PV id {} appears more than once.", entry.id));
        } else if previous.is_some_and(|p| entry.id < p) {
            warnings.push(format!("PV id {} is out of order.", entry.id));
        }
        previous = Some(entry.id);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_input() -> PricingTableInput {
        PricingTableInput {
            parameters: PricingParameters {
                car_price: dec!(6_500_000),
                deposit: dec!(30_000),
                rate_at_zero: dec!(3900),
                under15_diff: dec!(200),
                days_per_month: dec!(30.5),
                term_months: 55,
            },
            entries: vec![
                PvEntry::new(1, Decimal::ZERO),
                PvEntry::new(2, dec!(500_000)),
                PvEntry::new(3, dec!(1_000_000)),
            ],
        }
    }

    #[test]
    fn test_rows_follow_input_order() {
        let out = price_table(&sample_input()).unwrap();
        let ids: Vec<_> = out.result.rows.iter().map(|r| r.pv_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_tally() {
        let out = price_table(&sample_input()).unwrap();
        // 100.65% good, 86.8% warning, 72.96% bad
        assert_eq!(
            out.result.tally,
            StatusTally {
                good: 1,
                warning: 1,
                bad: 1
            }
        );
    }

    #[test]
    fn test_empty_entries() {
        let mut input = sample_input();
        input.entries.clear();
        let out = price_table(&input).unwrap();
        assert!(out.result.rows.is_empty());
        assert_eq!(out.result.tally, StatusTally::default());
    }

    #[test]
    fn test_negative_pv_warns_but_prices() {
        let mut input = sample_input();
        input.entries.push(PvEntry::new(4, dec!(-1)));
        let out = price_table(&input).unwrap();
        assert_eq!(out.result.rows.len(), 4);
        assert!(out.warnings.iter().any(|w| w.contains("negative")));
    }

    #[test]
    fn test_duplicate_and_unordered_ids_warn() {
        let mut input = sample_input();
        input.entries.push(PvEntry::new(2, dec!(1)));
        input.entries.push(PvEntry::new(0, dec!(1)));
        let out = price_table(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("more than once")));
        assert!(out.warnings.iter().any(|w| w.contains("out of order")));
    }

    #[test]
    fn test_degenerate_parameters_warn() {
        let mut input = sample_input();
        input.parameters.term_months = 0;
        input.parameters.car_price = Decimal::ZERO;
        let out = price_table(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Term is zero")));
        assert!(out.warnings.iter().any(|w| w.contains("Car price")));
        assert!(out.result.rows.iter().all(|r| r.rate_over15.is_none()));
    }

    #[test]
    fn test_envelope_metadata() {
        let out = price_table(&sample_input()).unwrap();
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert_eq!(out.assumptions["pv_multiplier"], "1.8");
    }
}
