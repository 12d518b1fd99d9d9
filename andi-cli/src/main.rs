//! andi: command-line driver for the Andi referral engine
//!
//! Loads the demo data set into a fresh session, optionally imports the
//! member directory, and runs one command against it.

use std::path::PathBuf;

use andi_cli::cli::{execute_command, Commands};
use andi_cli::settings::load_config;
use andi_core::{seed, ReferralSession};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "andi")]
#[command(about = "Referral matching and stats for the Andi referral network")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "ANDI_CONFIG", default_value = "andi.yaml")]
    config: PathBuf,

    /// Import the member directory before running the command
    #[arg(long)]
    import_members: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("andi=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    info!("Config file: {}", cli.config.display());

    let config = load_config(&cli.config)?;
    let now = chrono::Utc::now();
    let mut session = ReferralSession::seeded(config, now)?;

    if cli.import_members {
        session.import_members(seed::partners())?;
    }

    match execute_command(&mut session, cli.command, cli.json, now).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
