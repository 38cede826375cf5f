//! Seed the database with demo data for local development.
//!
//! Inserts a demo user (`ada@example.com` / `password123`) and a handful of
//! products so a fresh checkout has something to show. Safe to re-run: a
//! duplicate demo user is skipped, and products are only inserted into an
//! empty catalog.

use chrono::NaiveDate;
use tracing::info;

use bookstall_server::config::ServerConfig;
use bookstall_server::db::{self, ProductRepository, RepositoryError};
use bookstall_server::models::NewProduct;
use bookstall_server::services::{AuthError, AuthService};

const DEMO_PRODUCTS: &[(&str, &str, (i32, u32, u32), f64, f64)] = &[
    ("Dune", "Frank Herbert", (1965, 8, 1), 4.0, 12.5),
    ("Dune Messiah", "Frank Herbert", (1969, 10, 15), 2.0, 9.0),
    ("The Dispossessed", "Ursula K. Le Guin", (1974, 5, 1), 3.0, 11.0),
];

/// Insert demo users and products.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a database operation
/// fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::MIGRATOR.run(&pool).await?;

    // Demo user
    let auth = AuthService::new(&pool);
    match auth
        .register("Ada", "ada@example.com", "password123", "000", "UK")
        .await
    {
        Ok(id) => info!(user_id = %id, "Demo user created"),
        Err(AuthError::Repository(RepositoryError::Conflict(_))) => {
            info!("Demo user already exists, skipping");
        }
        Err(e) => return Err(e.into()),
    }

    // Demo products (only into an empty catalog)
    let products = ProductRepository::new(&pool);
    if products.list().await?.is_empty() {
        for &(name, writer, (y, m, d), quantity, price) in DEMO_PRODUCTS {
            let published_on = NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| format!("invalid demo date for {name}"))?;
            let new = NewProduct {
                name: name.to_string(),
                writer: writer.to_string(),
                published_on,
                quantity,
                price,
                image_path: None,
            };
            let id = products.insert(&new).await?;
            info!(product_id = %id, name, "Demo product created");
        }
    } else {
        info!("Catalog not empty, skipping demo products");
    }

    info!("Seeding complete!");
    Ok(())
}
