//! Command-line parsing for the `dl` tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! rules and the unit conversion code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::rules::SHUTTER_RETROFIT_RATE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "dl",
    version,
    about = "Wind configuration rules and marginal parameter unit conversion"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assign a HAZUS CECB configuration to every building in an inventory.
    Classify(ClassifyArgs),
    /// Convert a marginal parameter table into SI base units.
    Convert(ConvertArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ClassifyArgs {
    /// Inventory JSON (one building object or an array of them).
    #[arg(long, value_name = "JSON")]
    pub bim: PathBuf,

    /// Random seed for the pre-code shutter draws.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability that a pre-2000 building exposed to wind-borne debris has shutters.
    #[arg(long, default_value_t = SHUTTER_RETROFIT_RATE)]
    pub retrofit_rate: f64,

    /// Write the inventory, extended with the derived attributes, to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Print per-configuration counts after the listing.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    /// Marginal parameter CSV.
    #[arg(long, value_name = "CSV")]
    pub params: PathBuf,

    /// Extra unit definitions (`{"label": factor}`) merged over the standard table.
    #[arg(long, value_name = "JSON")]
    pub units: Option<PathBuf>,

    /// Unit used for rows with a blank `Units` cell (or no `Units` column).
    #[arg(long)]
    pub default_unit: Option<String>,

    /// Write the converted table here instead of stdout.
    #[arg(long, short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_defaults() {
        let cli = Cli::parse_from(["dl", "classify", "--bim", "b.json"]);
        let Command::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.seed, 42);
        assert_eq!(args.retrofit_rate, SHUTTER_RETROFIT_RATE);
        assert!(args.export.is_none());
    }

    #[test]
    fn convert_flags() {
        let cli = Cli::parse_from([
            "dl", "convert", "--params", "p.csv", "--default-unit", "ft", "-o", "out.csv",
        ]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.default_unit.as_deref(), Some("ft"));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }
}
