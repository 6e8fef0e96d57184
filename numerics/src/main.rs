//! `numerics` command-line driver.
//!
//! Integrates one of the sample functions with Romberg's method and prints
//! the result. Settings come from built-in defaults, then an optional TOML
//! file, then command-line flags.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use numerics::{dispatch, DriverConfig, Integrand, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "numerics", version, about = "Romberg integration of sample functions")]
struct Cli {
    /// TOML configuration file; a missing file means defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Function to integrate.
    #[arg(short, long, value_enum)]
    integrand: Option<Integrand>,

    /// Lower bound of the interval.
    #[arg(short, long, allow_negative_numbers = true)]
    a: Option<f64>,

    /// Upper bound of the interval.
    #[arg(short, long, allow_negative_numbers = true)]
    b: Option<f64>,

    /// Maximum number of refinement levels.
    #[arg(short = 'n', long)]
    levels: Option<usize>,

    /// Convergence threshold on successive diagonal entries.
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Print the full Romberg table.
    #[arg(short, long)]
    table: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<DriverConfig> {
        let mut config = match &self.config {
            Some(path) => DriverConfig::from_file(path)?,
            None => DriverConfig::default(),
        };
        if let Some(integrand) = self.integrand {
            config.integrand = integrand;
        }
        if let Some(a) = self.a {
            config.a = a;
        }
        if let Some(b) = self.b {
            config.b = b;
        }
        if let Some(levels) = self.levels {
            config.levels = levels;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        config.show_table |= self.table;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let stdout = io::stdout();
    dispatch(&config, &mut stdout.lock())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "numerics failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
