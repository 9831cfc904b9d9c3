//! # plagio CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use plagio_cli::documents::{run_analyse, run_get, run_upload, AnalyseArgs, GetArgs, UploadArgs};
use plagio_cli::gateway_client;
use plagio_cli::offline::{run_count, run_fingerprint, CountArgs, FingerprintArgs};

/// Plagio: deduplicating text store with cached document analysis.
#[derive(Parser, Debug)]
#[command(name = "plagio", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Gateway base URL. Defaults to PLAGIO_GATEWAY_URL.
    #[arg(long, global = true)]
    gateway: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a text file. Prints the document identifier.
    Upload(UploadArgs),

    /// Download a stored document.
    Get(GetArgs),

    /// Print paragraph, word and character counts of a stored document.
    Analyse(AnalyseArgs),

    /// Compute a file's fingerprint and blob location without uploading.
    Fingerprint(FingerprintArgs),

    /// Count a local file with the service's rules.
    Count(CountArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

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

    let result = run(cli).await;

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    match cli.command {
        Commands::Upload(args) => run_upload(&args, &gateway_client(cli.gateway)?).await,
        Commands::Get(args) => run_get(&args, &gateway_client(cli.gateway)?).await,
        Commands::Analyse(args) => run_analyse(&args, &gateway_client(cli.gateway)?).await,
        Commands::Fingerprint(args) => run_fingerprint(&args),
        Commands::Count(args) => run_count(&args),
    }
}
