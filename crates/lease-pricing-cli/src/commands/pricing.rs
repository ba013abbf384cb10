use clap::Args;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use lease_pricing_core::pricing::classification::classify;
use lease_pricing_core::pricing::engine::compute_row;
use lease_pricing_core::pricing::parameters::{PricingParameters, PvEntry, DEFAULT_DAYS_PER_MONTH};
use lease_pricing_core::pricing::table::{self, PricingTableInput};
use lease_pricing_core::pricing::validation::validate_parameters;

use crate::input;
use crate::settings::Settings;

/// Pricing parameters shared by every pricing command
#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Reference market price of the car
    #[arg(long)]
    pub car_price: Option<Decimal>,

    /// Deposit quoted with every offer
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Daily rate (over 15 days) at zero down-payment
    #[arg(long)]
    pub rate_at_zero: Option<Decimal>,

    /// Daily surcharge for rentals of 15 days or less
    #[arg(long, alias = "diff")]
    pub under15_diff: Option<Decimal>,

    /// Days per month (default 30.5)
    #[arg(long)]
    pub days_per_month: Option<Decimal>,

    /// Contract term in months
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,

    /// Reject degenerate parameters instead of pricing them
    #[arg(long)]
    pub strict: bool,
}

impl ParameterArgs {
    /// Flags first, then config/env defaults, then built-in defaults.
    pub fn resolve(&self, settings: &Settings) -> Result<PricingParameters, Box<dyn std::error::Error>> {
        let params = PricingParameters {
            car_price: self
                .car_price
                .ok_or("--car-price is required (or provide --input)")?,
            deposit: self.deposit.or(settings.deposit).unwrap_or(Decimal::ZERO),
            rate_at_zero: self
                .rate_at_zero
                .ok_or("--rate-at-zero is required (or provide --input)")?,
            under15_diff: self
                .under15_diff
                .or(settings.under15_diff)
                .unwrap_or(Decimal::ZERO),
            days_per_month: self
                .days_per_month
                .or(settings.days_per_month)
                .unwrap_or(DEFAULT_DAYS_PER_MONTH),
            term_months: self
                .term_months
                .or(settings.term_months)
                .ok_or("--term-months is required (or provide --input)")?,
        };
        Ok(params)
    }

    /// Whether any pricing parameter was given on the command line.
    pub fn any_given(&self) -> bool {
        self.car_price.is_some()
            || self.deposit.is_some()
            || self.rate_at_zero.is_some()
            || self.under15_diff.is_some()
            || self.days_per_month.is_some()
            || self.term_months.is_some()
    }
}

/// Load the input document for a pricing command, if there is one.
///
/// `--input` always wins. Piped stdin is only read when no parameter flags
/// were given, so flags never block on or get replaced by an open pipe.
/// Keys the document omits are filled from the config/env defaults.
pub fn read_document<T: DeserializeOwned>(
    input: Option<&str>,
    flags_given: bool,
    settings: &Settings,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let document: Option<Value> = match input {
        Some(path) => Some(input::file::read_input(path)?),
        None if flags_given => None,
        None => input::stdin::read_stdin()?,
    };

    match document {
        Some(mut document) => {
            settings.fill_document(&mut document);
            Ok(Some(serde_json::from_value(document)?))
        }
        None => Ok(None),
    }
}

/// Run strict validation when requested.
pub fn check_strict(strict: bool, params: &PricingParameters) -> Result<(), Box<dyn std::error::Error>> {
    if strict {
        validate_parameters(params)?;
    }
    Ok(())
}

/// Arguments for pricing a single PV
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RowArgs {
    /// Down-payment amount
    #[arg(long)]
    pub pv: Option<Decimal>,

    #[command(flatten)]
    pub params: ParameterArgs,

    /// Path to JSON/YAML input file (overrides individual flags). Without it,
    /// a document piped on stdin is used only when no other flags are given
    #[arg(long)]
    pub input: Option<String>,
}

/// Single-row document: `{ "parameters": {...}, "pv": 1000000 }`
#[derive(Debug, Deserialize)]
pub struct RowInput {
    pub parameters: PricingParameters,
    pub pv: Decimal,
}

/// Arguments for pricing a table of PV amounts
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TableArgs {
    /// Down-payment amount; repeat for several rows
    #[arg(long = "pv")]
    pub pvs: Vec<Decimal>,

    #[command(flatten)]
    pub params: ParameterArgs,

    /// Path to JSON/YAML input file (overrides individual flags). Without it,
    /// a document piped on stdin is used only when no other flags are given
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for classifying a buyout percentage
#[derive(Args)]
pub struct ClassifyArgs {
    /// Buyout as a percentage of the car price (e.g. 100.67)
    #[arg(long)]
    pub percent: Decimal,
}

pub fn run_row(args: RowArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let flags_given = args.pv.is_some() || args.params.any_given();
    let row_input = match read_document::<RowInput>(args.input.as_deref(), flags_given, settings)? {
        Some(document) => document,
        None => RowInput {
            parameters: args.params.resolve(settings)?,
            pv: args.pv.ok_or("--pv is required (or provide --input)")?,
        },
    };
    check_strict(args.params.strict, &row_input.parameters)?;

    let p = &row_input.parameters;
    let row = compute_row(
        row_input.pv,
        p.rate_at_zero,
        p.under15_diff,
        p.days_per_month,
        p.term_months,
        p.car_price,
    );
    tracing::info!(pv = %row_input.pv, status = %row.status, "priced row");
    Ok(serde_json::to_value(row)?)
}

pub fn run_table(args: TableArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let flags_given = !args.pvs.is_empty() || args.params.any_given();
    let document = read_document::<PricingTableInput>(args.input.as_deref(), flags_given, settings)?;
    let table_input = match document {
        Some(document) => document,
        None => {
            if args.pvs.is_empty() {
                return Err("at least one --pv is required (or provide --input)".into());
            }
            PricingTableInput {
                parameters: args.params.resolve(settings)?,
                entries: entries_from_amounts(&args.pvs),
            }
        }
    };
    check_strict(args.params.strict, &table_input.parameters)?;

    let result = table::price_table(&table_input)?;
    tracing::info!(rows = result.result.rows.len(), "priced table");
    Ok(serde_json::to_value(result)?)
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let status = classify(args.percent);
    Ok(serde_json::json!({
        "percent": args.percent.to_string(),
        "status": status,
    }))
}

/// Number PV amounts from the command line 1, 2, 3, ... in the order given.
pub fn entries_from_amounts(amounts: &[Decimal]) -> Vec<PvEntry> {
    amounts
        .iter()
        .zip(1u32..)
        .map(|(amount, id)| PvEntry::new(id, *amount))
        .collect()
}
