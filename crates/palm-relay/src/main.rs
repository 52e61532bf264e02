//! Palm Relay CLI - send palm photos to a multimodal LLM and relay its report.
//!
//! # Usage
//!
//! ```bash
//! # Run the HTTP relay (POST {"imageDataURL": "..."} to /api/analyze)
//! OPENAI_API_KEY=... palm-relay serve --port 8787
//!
//! # Analyze a local photo once
//! palm-relay analyze palm.jpg
//!
//! # View configuration
//! palm-relay config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Palm Relay - multimodal LLM relay for palm-photo observation reports.
#[derive(Parser, Debug)]
#[command(name = "palm-relay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "PALM_RELAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP relay server
    Serve(cli::serve::ServeArgs),

    /// Analyze a single local image and print the report
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = cli::load_config(cli.config.as_deref())?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Palm Relay v{}", palm_relay_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, cli.config, config).await,
    }
}
