//! SeaORM entity models
//!
//! Database entities for SDGraph

mod publication;
mod sdg_mapping;
mod user;

pub use publication::{
    Entity as PublicationEntity,
    Model as PublicationRow,
    ActiveModel as PublicationActiveModel,
    Column as PublicationColumn,
};

pub use sdg_mapping::{
    Entity as SdgMappingEntity,
    Model as SdgMappingRow,
    ActiveModel as SdgMappingActiveModel,
    Column as SdgMappingColumn,
};

pub use user::{
    Entity as UserEntity,
    Model as User,
    ActiveModel as UserActiveModel,
    Column as UserColumn,
};
