//! Bookstall CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema migrations
//! bookstall migrate
//!
//! # Insert demo users and products for local development
//! bookstall seed
//! ```
//!
//! The database URL is resolved the same way as the server:
//! `BOOKSTALL_DATABASE_URL`, then `DATABASE_URL`, then the local default.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bookstall")]
#[command(author, version, about = "Bookstall CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database schema migrations
    Migrate,
    /// Insert demo users and products for local development
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
