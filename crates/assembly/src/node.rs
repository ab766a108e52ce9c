//! Graph node records

use crate::key::{Namespace, NodeKey};
use serde::Serialize;

/// Node variant discriminant, for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Publication,
    Author,
    Institution,
    Topic,
    Sdg,
}

/// Variant-specific display attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Publication {
        title: String,
        #[serde(rename = "abstract")]
        abstract_text: String,
    },
    Author {
        full_name: String,
    },
    Institution {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        country: Option<String>,
    },
    Topic {
        keywords: Vec<String>,
    },
    #[serde(rename = "SDG")]
    Sdg {
        sdg_id: i32,
        name: String,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Publication { .. } => NodeType::Publication,
            NodeKind::Author { .. } => NodeType::Author,
            NodeKind::Institution { .. } => NodeType::Institution,
            NodeKind::Topic { .. } => NodeType::Topic,
            NodeKind::Sdg { .. } => NodeType::Sdg,
        }
    }

    /// Key namespace this variant lives in
    pub fn namespace(&self) -> Namespace {
        match self {
            NodeKind::Publication { .. } => Namespace::Doi,
            NodeKind::Author { .. } => Namespace::Orcid,
            NodeKind::Institution { .. } => Namespace::Ror,
            NodeKind::Topic { .. } => Namespace::Topic,
            NodeKind::Sdg { .. } => Namespace::Sdg,
        }
    }
}

/// A node as emitted to the visualization frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeKey,

    #[serde(flatten)]
    pub kind: NodeKind,

    /// Hover text; only SDG nodes get one today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl GraphNode {
    pub fn new(id: NodeKey, kind: NodeKind) -> Self {
        Self { id, kind, tooltip: None }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Apply extra attributes without touching the ones already present
    pub fn merge(&mut self, patch: NodePatch) {
        if let Some(tooltip) = patch.tooltip {
            self.tooltip = Some(tooltip);
        }
    }
}

/// Attributes written into an existing node after creation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub tooltip: Option<String>,
}

impl NodePatch {
    pub fn tooltip(text: impl Into<String>) -> Self {
        Self { tooltip: Some(text.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publication_wire_shape() {
        let node = GraphNode::new(
            NodeKey::publication("10.1/x"),
            NodeKind::Publication { title: "T".into(), abstract_text: "A".into() },
        );

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"id": "doi:10.1/x", "type": "Publication", "title": "T", "abstract": "A"})
        );
    }

    #[test]
    fn test_sdg_wire_shape_with_tooltip() {
        let mut node = GraphNode::new(
            NodeKey::sdg(7),
            NodeKind::Sdg { sdg_id: 7, name: "SDG 7 - Affordable and Clean Energy".into() },
        );
        node.merge(NodePatch::tooltip("hover"));

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "id": "sdg:7",
                "type": "SDG",
                "sdg_id": 7,
                "name": "SDG 7 - Affordable and Clean Energy",
                "tooltip": "hover"
            })
        );
    }

    #[test]
    fn test_institution_without_country_omits_field() {
        let node = GraphNode::new(
            NodeKey::new(Namespace::Ror, "ror.01"),
            NodeKind::Institution { name: "U".into(), country: None },
        );
        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("country").is_none());
        assert!(value.get("tooltip").is_none());
    }

    #[test]
    fn test_empty_patch_keeps_attributes() {
        let mut node = GraphNode::new(
            NodeKey::topic("t"),
            NodeKind::Topic { keywords: vec!["a".into()] },
        );
        node.merge(NodePatch::tooltip("first"));
        node.merge(NodePatch::default());

        assert_eq!(node.tooltip.as_deref(), Some("first"));
        assert_eq!(node.kind, NodeKind::Topic { keywords: vec!["a".into()] });
    }
}
