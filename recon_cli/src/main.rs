//! # Recon CLI
//!
//! Evaluates a JSON reconstruction job with `recon_core` and prints a JSON
//! report to stdout. Logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! # Standard constants
//! recon-cli job.json
//!
//! # Site-specific friction table and defaults, pretty output
//! recon-cli --config recon.toml --pretty job.json
//!
//! # Per-calculation debug logging
//! recon-cli -v job.json
//! ```
//!
//! A calculation that fails is reported in place with its structured error;
//! the remaining calculations still run. The exit code is non-zero only when
//! the config or job file cannot be read.

mod config;
mod job;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use recon_core::PhysicsCalculator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CliConfig;
use crate::job::Job;

#[derive(Parser, Debug)]
#[command(name = "recon-cli", version, about = "Evaluate an accident reconstruction job file")]
struct Args {
    /// Job file (.json)
    job: PathBuf,

    /// Configuration file (.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::load(args.config.as_deref())?;
    let calc = PhysicsCalculator::new(&config.constants);

    let content = fs::read_to_string(&args.job)
        .with_context(|| format!("failed to read job {}", args.job.display()))?;
    let job = Job::from_json(&content)
        .with_context(|| format!("invalid job {}", args.job.display()))?;

    let report = job.run(&calc, &config.defaults);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
