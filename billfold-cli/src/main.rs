//! Billfold CLI - account settings in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{billing, demo, payment, picture, profile, rename, status};

/// Billfold - account settings in your terminal
#[derive(Parser)]
#[command(name = "bf", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show account sync status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the user profile
    Profile {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename the account user
    Rename {
        /// New display name
        name: String,
    },

    /// Replace the profile picture with a JPEG file
    Picture {
        /// Path to a JPEG image
        file: PathBuf,
    },

    /// Manage payment methods
    Payment {
        #[command(subcommand)]
        command: payment::PaymentCommands,
    },

    /// Show billing balance and usage history
    Billing {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Seed the store with a demo account document
    Demo,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json).await,
        Commands::Profile { json } => profile::run(json).await,
        Commands::Rename { name } => rename::run(&name).await,
        Commands::Picture { file } => picture::run(&file).await,
        Commands::Payment { command } => payment::run(command).await,
        Commands::Billing { json } => billing::run(json).await,
        Commands::Demo => demo::run().await,
    }
}
