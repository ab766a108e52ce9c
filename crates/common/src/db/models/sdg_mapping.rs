//! Topic -> SDG reference mapping entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::SdgMapping;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sdg_mapping")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text", indexed)]
    pub topic_id: String,

    #[sea_orm(indexed)]
    pub sdg_id: i32,

    #[sea_orm(column_type = "Text")]
    pub sdg_name: String,

    pub mapping_weight: f64,
}

impl Model {
    /// Convert to the core record; goal ids outside 1..=17 are kept as is
    pub fn into_mapping(self) -> SdgMapping {
        SdgMapping {
            topic_id: self.topic_id,
            sdg_id: self.sdg_id,
            sdg_name: self.sdg_name,
            mapping_weight: self.mapping_weight,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_goal_kept() {
        let row = Model {
            id: 9,
            topic_id: "5".into(),
            sdg_id: 300,
            sdg_name: String::new(),
            mapping_weight: 0.4,
        };

        let mapping = row.into_mapping();
        assert_eq!(mapping.sdg_id, 300);
        assert_eq!(mapping.topic_id, "5");
    }
}
