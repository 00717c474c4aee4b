//! Application state - built once at startup and shared across all handlers.

use std::sync::Arc;

use blogsite_core::PostService;
use blogsite_core::ports::PostRepository;
use blogsite_infra::InMemoryPostRepository;

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use blogsite_infra::{DatabaseConnections, SeaOrmPostRepository};

/// Which store backs the post repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub posts_per_page: u64,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state with the configured store.
    ///
    /// Falls back to the in-memory store when no database is configured or
    /// the connection fails.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (repo, storage): (Arc<dyn PostRepository>, Storage) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => (
                        Arc::new(SeaOrmPostRepository::new(connections.main)),
                        Storage::Postgres,
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (Arc::new(InMemoryPostRepository::new()), Storage::Memory)
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Arc::new(InMemoryPostRepository::new()), Storage::Memory)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repo, storage): (Arc<dyn PostRepository>, Storage) = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            (Arc::new(InMemoryPostRepository::new()), Storage::Memory)
        };

        tracing::info!(storage = storage.as_str(), "Application state initialized");

        Self::with_repository(repo, config.posts_per_page, storage)
    }

    /// State over an explicit repository, e.g. an isolated store per test.
    pub fn with_repository(
        repo: Arc<dyn PostRepository>,
        posts_per_page: u64,
        storage: Storage,
    ) -> Self {
        Self {
            posts: PostService::new(repo),
            posts_per_page,
            storage,
        }
    }
}
