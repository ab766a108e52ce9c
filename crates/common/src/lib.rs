//! SDGraph Common Library
//!
//! Shared code for the SDGraph services including:
//! - Structured corpus records (publications, authors, topics, SDG mappings)
//! - Database models and the catalog store
//! - Error types and handling
//! - Configuration management
//! - Identity resolution
//! - Metrics and observability

pub mod auth;
pub mod config;
pub mod corpus;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::AppConfig;
pub use corpus::{Author, Institution, Publication, SdgMapping, TopicAssignment};
pub use db::{CatalogStore, CorpusScope, InMemoryCatalog, Repository};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of UN Sustainable Development Goals
pub const SDG_COUNT: u8 = 17;
