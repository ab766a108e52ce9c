//! SeaORM-backed catalog store
//!
//! Reads the corpus and reference tables and converts rows into the
//! structured records the core works on.

use crate::corpus::{Publication, SdgMapping};
use crate::db::models::*;
use crate::db::{CatalogStore, CorpusScope, DbPool};
use crate::errors::Result;
use crate::SDG_COUNT;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn fetch_publications(&self, scope: &CorpusScope) -> Result<Vec<Publication>> {
        let mut query = PublicationEntity::find().order_by_asc(PublicationColumn::Id);

        if let CorpusScope::User(user_id) = scope {
            query = query.filter(PublicationColumn::UploadedBy.eq(user_id.as_str()));
        }

        let rows = query.all(self.read_conn()).await?;

        tracing::debug!(rows = rows.len(), scope = ?scope, "Fetched corpus rows");

        Ok(rows.into_iter().map(PublicationRow::into_publication).collect())
    }

    async fn fetch_sdg_mappings(&self) -> Result<Vec<SdgMapping>> {
        let rows = SdgMappingEntity::find()
            .order_by_asc(SdgMappingColumn::Id)
            .all(self.read_conn())
            .await?;

        for row in rows.iter().filter(|row| !(1..=i32::from(SDG_COUNT)).contains(&row.sdg_id)) {
            tracing::warn!(mapping_id = row.id, sdg_id = row.sdg_id, "SDG mapping outside the known goals");
        }

        Ok(rows.into_iter().map(SdgMappingRow::into_mapping).collect())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>> {
        UserEntity::find_by_id(id.to_string())
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}
