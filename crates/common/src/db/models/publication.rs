//! Corpus entity (one row per uploaded publication)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{self, Publication};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "corpus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning user; the scope filter for per-user graphs
    pub uploaded_by: String,

    #[sea_orm(column_type = "Text")]
    pub file_name: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_name = "abstract", column_type = "Text")]
    pub abstract_text: String,

    #[sea_orm(column_type = "Text", nullable, unique)]
    pub doi: Option<String>,

    /// Serialized author list, possibly double-encoded
    #[sea_orm(column_type = "Json", nullable)]
    pub authors: Option<Json>,

    /// Serialized topic-assignment list, possibly double-encoded
    #[sea_orm(column_type = "Json", nullable)]
    pub topics: Option<Json>,

    pub date_uploaded: DateTime,
}

impl Model {
    /// Convert the stored row into a structured publication
    pub fn into_publication(self) -> Publication {
        let authors = corpus::parse_authors(self.id, self.authors.as_ref());
        let topics = corpus::parse_topics(self.id, self.topics.as_ref());

        Publication {
            id: self.id,
            doi: self.doi,
            title: self.title,
            abstract_text: self.abstract_text,
            authors,
            topics,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(authors: Option<Json>, topics: Option<Json>) -> Model {
        Model {
            id: 42,
            uploaded_by: "user_1".into(),
            file_name: "corpus.csv".into(),
            title: "Poverty Alleviation".into(),
            abstract_text: "Abstract".into(),
            doi: Some("10.1234/test".into()),
            authors,
            topics,
            date_uploaded: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let publication = row(
            Some(json!([{"full_name": "John Doe", "orcid": "0000-0001"}])),
            Some(json!([{"topic_id": "topic_1", "keywords": ["a"], "topic_probability": 0.5}])),
        )
        .into_publication();

        assert_eq!(publication.id, 42);
        assert_eq!(publication.authors.len(), 1);
        assert_eq!(publication.topics[0].topic_id, "topic_1");
    }

    #[test]
    fn test_row_with_bad_json_keeps_other_fields() {
        let publication = row(Some(json!("not json")), None).into_publication();
        assert!(publication.authors.is_empty());
        assert!(publication.topics.is_empty());
        assert_eq!(publication.doi.as_deref(), Some("10.1234/test"));
    }
}
