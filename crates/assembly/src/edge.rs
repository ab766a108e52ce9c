//! Typed, directed graph edges

use crate::key::NodeKey;
use serde::Serialize;

/// Edge discriminant, for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    AuthoredBy,
    AffiliatedWith,
    HasTopic,
    MapsToSdg,
}

/// Relationship type plus its per-occurrence payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Publication -> Author
    AuthoredBy {
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<u32>,
    },
    /// Author -> Institution
    AffiliatedWith,
    /// Publication -> Topic; probability belongs to the pair, not the topic
    HasTopic {
        topic_probability: f64,
        tooltip: String,
    },
    /// Topic -> SDG
    MapsToSdg {
        mapping_weight: f64,
    },
}

impl EdgeKind {
    pub fn edge_type(&self) -> EdgeType {
        match self {
            EdgeKind::AuthoredBy { .. } => EdgeType::AuthoredBy,
            EdgeKind::AffiliatedWith => EdgeType::AffiliatedWith,
            EdgeKind::HasTopic { .. } => EdgeType::HasTopic,
            EdgeKind::MapsToSdg { .. } => EdgeType::MapsToSdg,
        }
    }

    pub fn has_topic(topic_probability: f64) -> Self {
        EdgeKind::HasTopic {
            topic_probability,
            tooltip: format!("HAS_TOPIC\nTopic probability: {}", topic_probability),
        }
    }
}

/// A link as emitted to the visualization frontend.
///
/// Links are never deduplicated: the same (source, target, type) appears
/// once per contributing publication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

impl GraphEdge {
    pub fn new(source: NodeKey, target: NodeKey, kind: EdgeKind) -> Self {
        Self { source, target, kind }
    }

    pub fn edge_type(&self) -> EdgeType {
        self.kind.edge_type()
    }
}
