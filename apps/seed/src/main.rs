//! # Seed CLI
//!
//! Applies pending migrations, then inserts the sample posts through the
//! same validation and repository the API uses.

use std::sync::Arc;

use anyhow::Context;
use blogsite_core::PostService;
use blogsite_infra::{DatabaseConfig, DatabaseConnections, SeaOrmPostRepository};
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

mod samples;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/blogsite";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = DatabaseConnections::init(&DatabaseConfig::new(url))
        .await
        .context("connecting to the database")?;

    Migrator::up(&db.main, None)
        .await
        .context("applying migrations")?;

    tracing::info!("Seeding the database...");
    let service = PostService::new(Arc::new(SeaOrmPostRepository::new(db.main)));
    let inserted = samples::seed(&service).await?;

    tracing::info!(inserted, "Database seeded successfully!");
    Ok(())
}
