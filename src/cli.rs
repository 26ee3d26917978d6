use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "soillab", version, about = "Farm planning simulation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an example config file
    Init,
    /// Validate config and test the market data connection
    Check,
    /// Project harvest date, yield, quality, cost and revenue for a crop plan
    Simulate {
        /// Crop name, e.g. "노지 고추"
        #[arg(long)]
        crop: String,
        /// Planting date (YYYY-MM-DD)
        #[arg(long)]
        planting: NaiveDate,
        /// Heating target temperature in °C (enables the energy term)
        #[arg(long)]
        target_temp: Option<f64>,
        /// Area override in pyeong (defaults to the configured field)
        #[arg(long)]
        area: Option<f64>,
        /// Skip the market price lookup
        #[arg(long)]
        no_price: bool,
    },
    /// Site-corrected N/P/K requirement from the latest soil test
    Fertilizer {
        /// Crop name as listed in the standard table, e.g. "고추"
        #[arg(long)]
        crop: String,
        /// Area override in pyeong
        #[arg(long)]
        area: Option<f64>,
    },
    /// Predict a future unit price from the historical series
    Price {
        #[arg(long)]
        crop: String,
        /// Target sale date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Inspect or tune the simulation coefficients
    #[command(subcommand)]
    Coeffs(CoeffsCommand),
}

#[derive(Subcommand)]
pub enum CoeffsCommand {
    /// Print the effective coefficient set
    Show,
    /// Replace coefficients from a JSON file (requires edit permission)
    Set { file: PathBuf },
    /// Restore the built-in defaults (requires edit permission)
    Reset,
    /// Grant or revoke coefficient editing
    Allow {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        allowed: bool,
    },
}
