//! In-memory catalog store
//!
//! Holds already-structured records. Used by tests and local demos where no
//! database is available.

use crate::corpus::{Publication, SdgMapping};
use crate::db::models::User;
use crate::db::{CatalogStore, CorpusScope};
use crate::errors::Result;
use async_trait::async_trait;

/// A publication tagged with the user who uploaded it
#[derive(Debug, Clone)]
struct OwnedPublication {
    owner: String,
    publication: Publication,
}

/// Catalog backed by plain vectors
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    publications: Vec<OwnedPublication>,
    mappings: Vec<SdgMapping>,
    users: Vec<User>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a publication owned by `owner`
    pub fn with_publication(mut self, owner: &str, publication: Publication) -> Self {
        self.publications.push(OwnedPublication {
            owner: owner.to_string(),
            publication,
        });
        self
    }

    pub fn with_mapping(mut self, mapping: SdgMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn fetch_publications(&self, scope: &CorpusScope) -> Result<Vec<Publication>> {
        Ok(self
            .publications
            .iter()
            .filter(|p| match scope {
                CorpusScope::User(id) => &p.owner == id,
                CorpusScope::All => true,
            })
            .map(|p| p.publication.clone())
            .collect())
    }

    async fn fetch_sdg_mappings(&self) -> Result<Vec<SdgMapping>> {
        Ok(self.mappings.clone())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
