//! Database layer for SDGraph
//!
//! Provides:
//! - SeaORM entity models
//! - The `CatalogStore` contract the core reads its rows through
//! - A SeaORM-backed repository and an in-memory catalog
//! - Connection pool management

mod memory;
pub mod models;
mod repository;

pub use memory::InMemoryCatalog;
pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::corpus::{Publication, SdgMapping};
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use models::User;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Which publications a request may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusScope {
    /// Publications uploaded by one user
    User(String),
    /// Every publication (operator tooling)
    All,
}

impl CorpusScope {
    /// Scope for the given user id
    pub fn user(id: impl Into<String>) -> Self {
        CorpusScope::User(id.into())
    }
}

/// Read access to the publication catalog and reference tables
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Publications visible in `scope`, with author/topic lists already parsed
    async fn fetch_publications(&self, scope: &CorpusScope) -> Result<Vec<Publication>>;

    /// The global topic -> SDG mapping table
    async fn fetch_sdg_mappings(&self) -> Result<Vec<SdgMapping>>;

    /// Look up a user profile by subject id
    async fn find_user(&self, id: &str) -> Result<Option<User>>;

    /// Check connectivity
    async fn ping(&self) -> Result<()>;
}

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    /// Primary connection
    pub primary: DatabaseConnection,

    /// Read replica connection (optional)
    pub replica: Option<DatabaseConnection>,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to primary database...");

        let primary = connect(&config.url, config)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect to primary: {}", e)
            })?;

        // Connect to replica if configured
        let replica = match config.read_url {
            Some(ref read_url) => {
                info!("Connecting to read replica...");

                let replica_conn = connect(read_url, config)
                    .await
                    .map_err(|e| AppError::DatabaseConnection {
                        message: format!("Failed to connect to replica: {}", e)
                    })?;

                Some(replica_conn)
            }
            None => None,
        };

        info!("Database connections established");

        Ok(Self { primary, replica })
    }

    /// Get the connection for reads (replica if available, otherwise primary)
    pub fn read(&self) -> &DatabaseConnection {
        self.replica.as_ref().unwrap_or(&self.primary)
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;

        self.primary
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Primary ping failed: {}", e),
            })?;

        if let Some(ref replica) = self.replica {
            replica
                .execute_unprepared("SELECT 1")
                .await
                .map_err(|e| AppError::DatabaseConnection {
                    message: format!("Replica ping failed: {}", e),
                })?;
        }

        Ok(())
    }
}

async fn connect(
    url: &str,
    config: &DatabaseConfig,
) -> std::result::Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(false);

    Database::connect(opts).await
}
