//! Integration test harness for Bookstall.
//!
//! [`TestContext`] spawns the real application router on an ephemeral port,
//! backed by a temp-file `SQLite` database and a temp upload directory. Tests
//! drive it over HTTP with `reqwest`, so they exercise the full stack:
//! routing, extractors, repositories, and the upload store.

use std::path::PathBuf;

use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;

use bookstall_server::config::ServerConfig;
use bookstall_server::state::AppState;
use bookstall_server::{db, routes};

/// A running server instance with its own database and upload directory.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    // Keeps the temp database and upload directory alive for the test.
    _tmp: TempDir,
}

impl TestContext {
    /// Spawn a fresh server on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up; tests cannot
    /// proceed without either.
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = tmp.path().join("bookstall.db");
        let upload_dir = tmp.path().join("uploads");

        let database_url = SecretString::from(format!("sqlite://{}", db_path.display()));
        let pool = db::create_pool(&database_url)
            .await
            .expect("Failed to create database pool");
        db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let config = ServerConfig {
            database_url,
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            upload_dir: upload_dir.clone(),
        };
        let state = AppState::new(config, pool.clone());
        let app = routes::router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            pool,
            upload_dir,
            _tmp: tmp,
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Number of files currently in the upload directory (0 if it was never
    /// created).
    #[must_use]
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(Iterator::count)
            .unwrap_or(0)
    }
}
