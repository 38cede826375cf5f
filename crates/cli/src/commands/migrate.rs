//! Database migration command.
//!
//! Applies the schema migrations embedded in `bookstall-server`
//! (`crates/server/migrations/`). The server also applies them at startup;
//! this command exists for running them against a database without starting
//! the server.

use bookstall_server::config::ServerConfig;
use bookstall_server::db;

/// Apply all pending schema migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// reached, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
