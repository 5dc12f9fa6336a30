//! LeaseSmallSpace CLI - database migrations and CSV export.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema and both session tables
//! lss-cli migrate
//!
//! # Export the newest page of leads to leads-<date>.csv
//! lss-cli export leads
//!
//! # Export page 3 of questionnaire responses to a chosen file
//! lss-cli export responses --page 3 --out responses.csv
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `export` - Write one listing page as CSV, exactly as the admin shows it

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lss-cli")]
#[command(author, version, about = "LeaseSmallSpace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations and create the session tables
    Migrate,
    /// Export a listing page as CSV
    Export {
        /// Table to export: leads, inquiries, responses or users
        entity: String,

        /// 1-based page, 25 rows per page
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Output file (default: <entity>-<date>.csv in the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Export { entity, page, out } => {
            commands::export::run(&entity, page, out).await?;
        }
    }
    Ok(())
}
