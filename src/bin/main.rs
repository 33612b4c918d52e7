//! svm-scale command line interface
//!
//! Scales a libsvm dataset feature by feature into a target interval and
//! prints the result to stdout (or a file), optionally saving or restoring
//! the scaling parameters.

use clap::Parser;
use env_logger::Env;
use log::{debug, error, info, warn};
use std::io;
use std::path::PathBuf;
use std::process;
use svm_scale::api::Scaler;
use svm_scale::core::{KernelParams, Result};

#[derive(Parser)]
#[command(name = "svm-scale")]
#[command(about = "Scale libsvm datasets feature by feature into a target interval")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "svm-scale contributors")]
struct Cli {
    /// Dataset file in libsvm format
    data: PathBuf,

    /// Lower bound of the target interval
    #[arg(short, long, default_value_t = -1.0, allow_negative_numbers = true)]
    lower: f64,

    /// Upper bound of the target interval
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    upper: f64,

    /// Restore scaling parameters from file (overrides --lower and --upper)
    #[arg(short, long)]
    restore: Option<PathBuf>,

    /// Save scaling parameters to file (.json for JSON, otherwise range file)
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Label scaling limits; accepted for compatibility and ignored
    #[arg(
        short = 'y',
        num_args = 2,
        value_names = ["Y_LOWER", "Y_UPPER"],
        allow_negative_numbers = true
    )]
    y_limits: Option<Vec<f64>>,

    /// Write the scaled dataset to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = scale_command(cli) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn scale_command(cli: Cli) -> Result<()> {
    if cli.y_limits.is_some() {
        warn!("-y label scaling is not supported; ignoring");
    }

    let mut scaler = Scaler::new().with_bounds(cli.lower, cli.upper);
    if let Some(path) = &cli.restore {
        if cli.lower != -1.0 || cli.upper != 1.0 {
            warn!("Bounds from {} override --lower/--upper", path.display());
        }
        scaler = scaler.restore_from(path);
    }
    if let Some(path) = &cli.save {
        scaler = scaler.save_to(path);
    }

    info!("Scaling {}", cli.data.display());
    let scaled = scaler.scale_file(&cli.data)?;

    let params = KernelParams::default().with_default_gamma(scaled.outcome.max_index);
    debug!(
        "Max feature index {}, default gamma {}",
        scaled.outcome.max_index, params.gamma
    );

    // Only reached once every record scaled cleanly
    match &cli.output {
        Some(path) => {
            scaled.dataset.save_to_file(path)?;
            info!("Scaled dataset saved to: {}", path.display());
        }
        None => scaled.dataset.write_to(io::stdout().lock())?,
    }

    info!(
        "Scaled {} records into [{}, {}]",
        scaled.dataset.len(),
        scaled.outcome.interval.lower,
        scaled.outcome.interval.upper
    );
    Ok(())
}
