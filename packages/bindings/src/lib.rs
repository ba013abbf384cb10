use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use lease_pricing_core::pricing::parameters::PricingParameters;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct RowRequest {
    parameters: PricingParameters,
    pv: Decimal,
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// `{ "parameters": {...}, "pv": 1000000 }` -> one calculation row.
#[napi]
pub fn compute_row(input_json: String) -> NapiResult<String> {
    let input: RowRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let p = &input.parameters;
    let row = lease_pricing_core::pricing::engine::compute_row(
        input.pv,
        p.rate_at_zero,
        p.under15_diff,
        p.days_per_month,
        p.term_months,
        p.car_price,
    );
    serde_json::to_string(&row).map_err(to_napi_error)
}

#[napi]
pub fn price_table(input_json: String) -> NapiResult<String> {
    let input: lease_pricing_core::pricing::table::PricingTableInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lease_pricing_core::pricing::table::price_table(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Percent is passed as a string to keep decimal precision across the boundary.
#[napi]
pub fn classify_percent(percent: String) -> NapiResult<String> {
    let percent: Decimal = percent.trim().parse().map_err(to_napi_error)?;
    Ok(lease_pricing_core::pricing::classification::classify(percent).to_string())
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

#[napi]
pub fn build_quote(input_json: String) -> NapiResult<String> {
    let input: lease_pricing_core::quote::builder::QuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lease_pricing_core::quote::builder::generate_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
