//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments into run configs
//! - runs the classify / convert pipelines
//! - prints results and writes optional exports

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{ClassifyArgs, Command, ConvertArgs};
use crate::error::AppError;

pub mod pipeline;

/// Settings for a `dl classify` run.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    pub bim_path: PathBuf,
    pub seed: u64,
    pub retrofit_rate: f64,
    pub export: Option<PathBuf>,
    pub summary: bool,
}

/// Settings for a `dl convert` run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub params_path: PathBuf,
    pub units_path: Option<PathBuf>,
    pub default_unit: Option<String>,
    pub output: Option<PathBuf>,
}

/// Entry point for the `dl` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Classify(args) => handle_classify(&classify_config_from_args(&args)),
        Command::Convert(args) => handle_convert(&convert_config_from_args(&args)),
    }
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` overrides the
/// default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_classify(config: &ClassifyConfig) -> Result<(), AppError> {
    let run = pipeline::run_classify(config)?;

    print!(
        "{}",
        crate::report::format_configs(&run.buildings, &run.configs)
    );
    if config.summary {
        println!();
        print!("{}", crate::report::format_summary(&run.summary));
    }

    if let Some(path) = &config.export {
        crate::io::write_inventory_json(path, &run.buildings)?;
    }
    Ok(())
}

fn handle_convert(config: &ConvertConfig) -> Result<(), AppError> {
    let converted = pipeline::run_convert(config)?;

    match &config.output {
        Some(path) => crate::io::write_params_csv(path, &converted),
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            crate::io::write_params(&mut lock, &converted)?;
            lock.flush()
                .map_err(|e| AppError::input(format!("Failed to write to stdout: {e}")))
        }
    }
}

pub fn classify_config_from_args(args: &ClassifyArgs) -> ClassifyConfig {
    ClassifyConfig {
        bim_path: args.bim.clone(),
        seed: args.seed,
        retrofit_rate: args.retrofit_rate,
        export: args.export.clone(),
        summary: args.summary,
    }
}

pub fn convert_config_from_args(args: &ConvertArgs) -> ConvertConfig {
    ConvertConfig {
        params_path: args.params.clone(),
        units_path: args.units.clone(),
        default_unit: args.default_unit.clone(),
        output: args.output.clone(),
    }
}
