//! Client-facing quote message built from priced rows.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::time::Instant;

use super::format::{format_amount, format_optional_amount, QuoteLocale};
use crate::pricing::engine::CalculationRow;
use crate::pricing::parameters::{PricingParameters, PvEntry};
use crate::pricing::table::{price_table, PricingTable, PricingTableInput};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LeasePricingResult;

/// Marks the start of each per-row offer line.
pub const OFFER_LINE_PREFIX: &str = "• PV ";

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    pub client_name: String,
    pub car_model: String,
    #[serde(default)]
    pub locale: QuoteLocale,
    pub parameters: PricingParameters,
    pub entries: Vec<PvEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteOutput {
    /// Message ready to send to the client; empty when there are no rows
    pub text: String,
    pub table: PricingTable,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the quote message with the default locale.
pub fn build_quote_text(
    client_name: &str,
    car_model: &str,
    deposit: Money,
    term_months: u32,
    rows: &[CalculationRow],
) -> String {
    build_quote_text_with(
        QuoteLocale::default(),
        client_name,
        car_model,
        deposit,
        term_months,
        rows,
    )
}

/// Build the quote message: a salutation, one offer line per row, and a
/// closing paragraph. Returns an empty string when `rows` is empty.
pub fn build_quote_text_with(
    locale: QuoteLocale,
    client_name: &str,
    car_model: &str,
    deposit: Money,
    term_months: u32,
    rows: &[CalculationRow],
) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let deposit = format_amount(deposit, locale);
    let mut text = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(text, "Hello, {client_name}!");
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "Thank you for your interest in the {car_model}. Here are our rent-to-own terms:"
    );
    let _ = writeln!(text);
    for row in rows {
        let _ = writeln!(
            text,
            "{OFFER_LINE_PREFIX}{}, deposit {}: {} per day for rentals over 15 days, \
             {} per day for rentals of 15 days or less, term {} months.",
            format_amount(row.pv, locale),
            deposit,
            format_optional_amount(row.rate_over15_rounded, locale),
            format_optional_amount(row.rate_under15_rounded, locale),
            term_months,
        );
    }
    let _ = writeln!(text);
    text.push_str(
        "At the end of the term the car becomes your property. \
         Reply to this message and we will reserve it for you.",
    );

    text
}

/// Price the session and build the quote message in one step.
pub fn generate_quote(input: &QuoteInput) -> LeasePricingResult<ComputationOutput<QuoteOutput>> {
    let start = Instant::now();

    let priced = price_table(&PricingTableInput {
        parameters: input.parameters.clone(),
        entries: input.entries.clone(),
    })?;

    let text = build_quote_text_with(
        input.locale,
        &input.client_name,
        &input.car_model,
        input.parameters.deposit,
        input.parameters.term_months,
        &priced.result.rows,
    );

    tracing::debug!(
        client = %input.client_name,
        rows = priced.result.rows.len(),
        locale = %input.locale,
        "built quote"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Rent-to-own quote message",
        &priced.assumptions,
        priced.warnings,
        elapsed,
        QuoteOutput {
            text,
            table: priced.result,
        },
    )
}
