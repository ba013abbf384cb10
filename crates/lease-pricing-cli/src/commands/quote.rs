use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lease_pricing_core::quote::builder::{self, QuoteInput};
use lease_pricing_core::quote::format::QuoteLocale;

use super::pricing::{check_strict, entries_from_amounts, read_document, ParameterArgs};
use crate::settings::Settings;

/// Arguments for building a client quote
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Client name used in the salutation
    #[arg(long)]
    pub client_name: Option<String>,

    /// Car model offered
    #[arg(long)]
    pub car_model: Option<String>,

    /// Digit grouping: en (1,000,000) or ru (1 000 000)
    #[arg(long)]
    pub locale: Option<QuoteLocale>,

    /// Down-payment amount; repeat for several offers
    #[arg(long = "pv")]
    pub pvs: Vec<Decimal>,

    #[command(flatten)]
    pub params: ParameterArgs,

    /// Path to JSON/YAML input file (overrides individual flags). Without it,
    /// a document piped on stdin is used only when no other flags are given
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_quote(args: QuoteArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let flags_given = !args.pvs.is_empty()
        || args.client_name.is_some()
        || args.car_model.is_some()
        || args.params.any_given();
    let document = read_document::<QuoteInput>(args.input.as_deref(), flags_given, settings)?;
    let mut quote_input = match document {
        Some(document) => document,
        None => quote_from_flags(&args, settings)?,
    };
    if let Some(locale) = args.locale {
        quote_input.locale = locale;
    }
    check_strict(args.params.strict, &quote_input.parameters)?;

    let result = builder::generate_quote(&quote_input)?;
    tracing::info!(
        client = %quote_input.client_name,
        offers = result.result.table.rows.len(),
        "built quote"
    );
    Ok(serde_json::to_value(result)?)
}

fn quote_from_flags(args: &QuoteArgs, settings: &Settings) -> Result<QuoteInput, Box<dyn std::error::Error>> {
    if args.pvs.is_empty() {
        return Err("at least one --pv is required (or provide --input)".into());
    }
    Ok(QuoteInput {
        client_name: args
            .client_name
            .clone()
            .ok_or("--client-name is required (or provide --input)")?,
        car_model: args
            .car_model
            .clone()
            .ok_or("--car-model is required (or provide --input)")?,
        locale: settings.locale.unwrap_or_default(),
        parameters: args.params.resolve(settings)?,
        entries: entries_from_amounts(&args.pvs),
    })
}
