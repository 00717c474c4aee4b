//! Migration CLI tool.
//!
//! `cargo run -p migration -- up` applies pending migrations against `DATABASE_URL`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    tracing::info!("Running post schema migrations");
    cli::run_cli(migration::Migrator).await;
}
