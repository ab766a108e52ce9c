//! Node deduplication index
//!
//! Maps namespaced keys to node records so each real-world entity appears
//! once in the output no matter how many publications reference it.
//! Insertion order is kept, which makes the emitted node list stable for a
//! given input.

use crate::key::NodeKey;
use crate::node::{GraphNode, NodeKind, NodePatch};
use std::collections::HashMap;

/// Handle to a node held by a `NodeIndex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef(usize);

/// Request-scoped node store
#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: Vec<GraphNode>,
    slots: HashMap<NodeKey, usize>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with `key` exists; an existing node is left as is
    pub fn upsert(&mut self, key: NodeKey, kind: NodeKind) -> NodeRef {
        debug_assert_eq!(key.namespace(), kind.namespace());

        if let Some(&slot) = self.slots.get(&key) {
            return NodeRef(slot);
        }

        let slot = self.nodes.len();
        self.nodes.push(GraphNode::new(key.clone(), kind));
        self.slots.insert(key, slot);
        NodeRef(slot)
    }

    /// Like `upsert`, then merge `patch` into whichever node ends up under `key`
    pub fn upsert_merge(&mut self, key: NodeKey, kind: NodeKind, patch: NodePatch) -> NodeRef {
        let node_ref = self.upsert(key, kind);
        self.nodes[node_ref.0].merge(patch);
        node_ref
    }

    pub fn node(&self, node_ref: NodeRef) -> &GraphNode {
        &self.nodes[node_ref.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<GraphNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(keywords: &[&str]) -> NodeKind {
        NodeKind::Topic {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_duplicate_insert_returns_existing() {
        let mut index = NodeIndex::new();
        let first = index.upsert(NodeKey::topic("t1"), topic(&["first"]));
        let second = index.upsert(NodeKey::topic("t1"), topic(&["second"]));

        assert_eq!(first, second);
        assert_eq!(index.len(), 1);
        assert_eq!(index.node(first).kind, topic(&["first"]));
    }

    #[test]
    fn test_merge_extends_existing_node() {
        let mut index = NodeIndex::new();
        index.upsert(NodeKey::topic("t1"), topic(&["kept"]));
        let merged = index.upsert_merge(
            NodeKey::topic("t1"),
            topic(&["ignored"]),
            NodePatch::tooltip("hover"),
        );

        let node = index.node(merged);
        assert_eq!(node.kind, topic(&["kept"]));
        assert_eq!(node.tooltip.as_deref(), Some("hover"));
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut index = NodeIndex::new();
        for id in ["c", "a", "b", "a"] {
            index.upsert(NodeKey::topic(id), topic(&[]));
        }

        let ids: Vec<String> = index.into_nodes().iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, vec!["topic:c", "topic:a", "topic:b"]);
    }
}
