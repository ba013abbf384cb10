mod commands;
mod input;
mod output;
mod settings;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;

use commands::pricing::{ClassifyArgs, RowArgs, TableArgs};
use commands::quote::QuoteArgs;
use settings::Settings;

/// Rent-to-own vehicle lease pricing
#[derive(Parser)]
#[command(
    name = "leasecalc",
    version,
    about = "Rent-to-own vehicle lease pricing",
    long_about = "Prices rent-to-own vehicle offers with decimal precision: total buyout \
                  per down-payment, daily rates for the over-15 and under-15 day tiers \
                  rounded up to the rate step, a market check against the car price, \
                  and a ready-to-send client quote."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Config file with session defaults (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single down-payment amount
    Row(RowArgs),
    /// Price a table of down-payment amounts
    Table(TableArgs),
    /// Price a table and build the client quote message
    Quote(QuoteArgs),
    /// Classify a buyout percentage against the car price
    Classify(ClassifyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: failed to load config: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    tracing::debug!(?settings, "loaded settings");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Row(args) => commands::pricing::run_row(args, &settings),
        Commands::Table(args) => commands::pricing::run_table(args, &settings),
        Commands::Quote(args) => commands::quote::run_quote(args, &settings),
        Commands::Classify(args) => commands::pricing::run_classify(args),
        Commands::Version => {
            println!("leasecalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
