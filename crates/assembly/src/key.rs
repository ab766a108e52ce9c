//! Namespaced node identity keys
//!
//! Every node in the graph is identified by a `(Namespace, raw id)` pair,
//! rendered on the wire as `"<prefix>:<raw>"`. Namespaces keep entity types
//! apart: an author and a topic with the same raw id never collide.

use sdgraph_common::corpus::{Author, Institution};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// Entity type a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Doi,
    Orcid,
    Ror,
    Topic,
    Sdg,
}

impl Namespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Doi => "doi",
            Namespace::Orcid => "orcid",
            Namespace::Ror => "ror",
            Namespace::Topic => "topic",
            Namespace::Sdg => "sdg",
        }
    }
}

/// Identity of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    namespace: Namespace,
    raw: String,
}

impl NodeKey {
    pub fn new(namespace: Namespace, raw: impl Into<String>) -> Self {
        Self {
            namespace,
            raw: raw.into(),
        }
    }

    pub fn publication(doi: &str) -> Self {
        Self::new(Namespace::Doi, doi.trim())
    }

    /// ORCID when present, otherwise a key derived from the author's name.
    ///
    /// `None` for an author with neither, who has no identity to merge on.
    pub fn author(author: &Author) -> Option<Self> {
        if let Some(orcid) = author.orcid() {
            return Some(Self::new(Namespace::Orcid, orcid));
        }
        author
            .display_name()
            .map(|name| Self::new(Namespace::Orcid, name_fallback(name)))
    }

    /// ROR id when present, otherwise a key derived from the institution name
    pub fn institution(institution: &Institution) -> Self {
        match institution.ror_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(ror) => Self::new(Namespace::Ror, ror),
            None => Self::new(Namespace::Ror, name_fallback(&institution.name)),
        }
    }

    pub fn topic(topic_id: &str) -> Self {
        Self::new(Namespace::Topic, topic_id)
    }

    pub fn sdg(sdg_id: i32) -> Self {
        Self::new(Namespace::Sdg, sdg_id.to_string())
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.raw)
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Deterministic stand-in id for entities without a persistent identifier.
///
/// Case and whitespace are normalized first, so "Jane  Doe" and "jane doe"
/// share a key. Distinct people with the same name also share one.
fn name_fallback(name: &str) -> String {
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let digest = Sha256::digest(normalized.as_bytes());
    format!("name-{}", hex::encode(&digest[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str, orcid: Option<&str>) -> Author {
        Author {
            full_name: name.into(),
            orcid: orcid.map(String::from),
            position: None,
            institution: None,
        }
    }

    #[test]
    fn test_display_uses_prefix() {
        assert_eq!(NodeKey::publication("10.1/x").to_string(), "doi:10.1/x");
        assert_eq!(NodeKey::topic("topic_1").to_string(), "topic:topic_1");
        assert_eq!(NodeKey::sdg(13).to_string(), "sdg:13");
    }

    #[test]
    fn test_namespaces_never_collide() {
        let topic = NodeKey::topic("5");
        let sdg = NodeKey::sdg(5);
        assert_ne!(topic, sdg);
        assert_eq!(topic.raw(), sdg.raw());
    }

    #[test]
    fn test_author_prefers_orcid() {
        let key = NodeKey::author(&author("John Doe", Some(" 0000-0002-1825-0097 ")));
        assert_eq!(key.map(|k| k.to_string()).as_deref(), Some("orcid:0000-0002-1825-0097"));
    }

    #[test]
    fn test_name_fallback_is_stable_and_normalized() {
        let a = NodeKey::author(&author("Jane  Doe", None)).unwrap();
        let b = NodeKey::author(&author(" jane doe", Some(""))).unwrap();
        let c = NodeKey::author(&author("Jane Roe", None)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.raw().starts_with("name-"));
        assert_eq!(a.raw().len(), "name-".len() + 16);
    }

    #[test]
    fn test_author_without_name_or_orcid_has_no_key() {
        assert_eq!(NodeKey::author(&author("", None)), None);
        assert_eq!(NodeKey::author(&author("   ", Some(" "))), None);

        let orcid_only = NodeKey::author(&author("", Some("0000-0003")));
        assert_eq!(orcid_only, Some(NodeKey::new(Namespace::Orcid, "0000-0003")));
    }

    #[test]
    fn test_institution_fallback() {
        let with_ror = Institution { name: "U".into(), ror_id: Some("ror.01".into()), country: None };
        let without = Institution { name: "U".into(), ror_id: None, country: None };

        assert_eq!(NodeKey::institution(&with_ror).to_string(), "ror:ror.01");
        assert_eq!(NodeKey::institution(&without).namespace(), Namespace::Ror);
        assert_eq!(NodeKey::institution(&without), NodeKey::institution(&without.clone()));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&NodeKey::publication("10.1/x")).unwrap();
        assert_eq!(json, "\"doi:10.1/x\"");
    }
}
