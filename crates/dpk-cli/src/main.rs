//! # dpk CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dpk_core::CanonicalForm;
use tracing_subscriber::EnvFilter;

use dpk_cli::batch::{run_batch, BatchArgs};
use dpk_cli::config::CliConfig;
use dpk_cli::derive::{run_derive, DeriveArgs};
use dpk_cli::samples::{run_samples, SamplesArgs};

/// Deterministic partition keys for arbitrary JSON events.
#[derive(Parser, Debug)]
#[command(name = "dpk", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit keys longer than this many UTF-16 code units are hashed.
    #[arg(long, global = true)]
    max_key_length: Option<usize>,

    /// Key printed for an absent event.
    #[arg(long, global = true)]
    trivial_key: Option<String>,

    /// Canonical JSON form for hashing (`json` or `jcs`).
    #[arg(long, global = true)]
    canonicalizer: Option<CanonicalForm>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the key for one event.
    Derive(DeriveArgs),

    /// Derive keys for newline-delimited JSON events on stdin.
    Batch(BatchArgs),

    /// Print keys for the built-in sample events.
    Samples(SamplesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = CliConfig::from_env()?.with_overrides(
        cli.max_key_length,
        cli.trivial_key,
        cli.canonicalizer,
    );
    let deriver = config.build_deriver()?;
    tracing::debug!(
        max_key_length = deriver.config().max_key_length,
        trivial_key = %deriver.config().trivial_key,
        canonicalizer = %deriver.canonicalizer(),
        "resolved configuration"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Derive(args) => run_derive(&args, &deriver, std::io::stdin().lock(), &mut out),
        Commands::Batch(args) => run_batch(&args, &deriver, std::io::stdin().lock(), &mut out),
        Commands::Samples(args) => run_samples(&args, &deriver, &mut out),
    }
}
