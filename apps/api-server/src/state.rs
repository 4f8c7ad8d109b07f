//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostCatalog;
use quill_core::ports::{PostRepository, SystemClock, UserRepository};
use quill_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub catalog: Arc<PostCatalog>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    #[cfg(feature = "postgres")]
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let (db, users, posts): (
            Option<Arc<DatabaseConnections>>,
            Arc<dyn UserRepository>,
            Arc<dyn PostRepository>,
        ) = if let Some(config) = db_config {
            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let users = Arc::new(PostgresUserRepository::new(conn.main.clone()));
                    let posts = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                    (Some(conn), users, posts)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (
                        None,
                        Arc::new(InMemoryUserRepository::new()),
                        Arc::new(InMemoryPostRepository::new()),
                    )
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            (
                None,
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
            )
        };

        let catalog = Arc::new(PostCatalog::new(posts, Arc::new(SystemClock)));

        tracing::info!("Application state initialized");

        Self { users, catalog, db }
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new() -> Self {
        tracing::info!("Running without postgres feature - using in-memory repositories");

        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let catalog = Arc::new(PostCatalog::new(posts, Arc::new(SystemClock)));

        Self { users, catalog }
    }
}
