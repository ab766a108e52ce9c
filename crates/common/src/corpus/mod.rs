//! Structured corpus records
//!
//! Author and topic lists are stored as JSON columns on the corpus table.
//! They are deserialized exactly once, here, at the repository boundary;
//! everything downstream works on these typed records. A list that fails
//! to deserialize is treated as empty for that publication only.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A research institution embedded in an author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ror_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Institution {
    /// Name with surrounding whitespace removed, `None` when blank
    pub fn display_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

/// One author of a publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,

    /// 1-based byline position, when the source recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<Institution>,
}

impl Author {
    /// Name with surrounding whitespace removed, `None` when blank
    pub fn display_name(&self) -> Option<&str> {
        non_blank(&self.full_name)
    }

    pub fn orcid(&self) -> Option<&str> {
        self.orcid.as_deref().and_then(non_blank)
    }

    /// The institution, if it has a usable name
    pub fn named_institution(&self) -> Option<&Institution> {
        self.institution
            .as_ref()
            .filter(|inst| inst.display_name().is_some())
    }
}

/// A topic-model assignment for one publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicAssignment {
    #[serde(deserialize_with = "string_or_number")]
    pub topic_id: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Probability of this topic for this publication, in [0, 1]
    #[serde(default)]
    pub topic_probability: f64,
}

/// A publication as seen by graph assembly and the statistics reducers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: i32,
    pub doi: Option<String>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub topics: Vec<TopicAssignment>,
}

impl Publication {
    /// DOI trimmed, `None` when absent or blank
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().and_then(non_blank)
    }

    /// Whether this publication can take part in graph assembly
    pub fn has_doi(&self) -> bool {
        self.doi().is_some()
    }
}

/// One row of the global topic -> SDG reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgMapping {
    pub topic_id: String,
    pub sdg_id: i32,
    pub sdg_name: String,
    pub mapping_weight: f64,
}

/// Which JSON column a malformed value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Authors,
    Topics,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Authors => "authors",
            RecordField::Topics => "topics",
        }
    }
}

/// Parse a stored author list, tolerating absent or malformed values
pub fn parse_authors(publication_id: i32, value: Option<&Value>) -> Vec<Author> {
    parse_list(publication_id, RecordField::Authors, value)
}

/// Parse a stored topic-assignment list, tolerating absent or malformed values
pub fn parse_topics(publication_id: i32, value: Option<&Value>) -> Vec<TopicAssignment> {
    parse_list(publication_id, RecordField::Topics, value)
}

fn parse_list<T>(publication_id: i32, field: RecordField, value: Option<&Value>) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    let parsed = match value {
        None | Some(Value::Null) => return Vec::new(),
        // Some uploads stored the list as a JSON-encoded string
        Some(Value::String(raw)) if raw.trim().is_empty() => return Vec::new(),
        Some(Value::String(raw)) => serde_json::from_str::<Vec<T>>(raw),
        Some(other) => Vec::<T>::deserialize(other),
    };

    match parsed {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                publication_id,
                field = field.as_str(),
                error = %e,
                "Malformed record list, treating as empty"
            );
            crate::metrics::record_malformed(field);
            Vec::new()
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_authors_array() {
        let value = json!([
            {"full_name": "John Doe", "orcid": "0000-0002-1825-0097",
             "institution": {"name": "Test University", "ror_id": "ror.01abcde"}},
            {"full_name": "Jane Smith", "position": 2}
        ]);

        let authors = parse_authors(1, Some(&value));
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].orcid.as_deref(), Some("0000-0002-1825-0097"));
        assert_eq!(
            authors[0].named_institution().map(|i| i.name.as_str()),
            Some("Test University")
        );
        assert_eq!(authors[1].position, Some(2));
        assert!(authors[1].institution.is_none());
    }

    #[test]
    fn test_parse_double_encoded_topics() {
        let encoded = json!([
            {"topic_id": "topic_1", "keywords": ["poverty", "economy"], "topic_probability": 0.75}
        ])
        .to_string();

        let topics = parse_topics(7, Some(&Value::String(encoded)));
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].topic_id, "topic_1");
        assert_eq!(topics[0].keywords, vec!["poverty", "economy"]);
    }

    #[test]
    fn test_numeric_topic_id_normalized() {
        let value = json!([{"topic_id": 5, "keywords": [], "topic_probability": 0.4}]);
        let topics = parse_topics(1, Some(&value));
        assert_eq!(topics[0].topic_id, "5");
    }

    #[test]
    fn test_malformed_lists_become_empty() {
        assert!(parse_authors(1, None).is_empty());
        assert!(parse_authors(1, Some(&Value::Null)).is_empty());
        assert!(parse_authors(1, Some(&json!({"full_name": "not a list"}))).is_empty());
        assert!(parse_authors(1, Some(&Value::String("[{broken".into()))).is_empty());
        assert!(parse_topics(1, Some(&json!([{"keywords": ["no id"]}]))).is_empty());
    }

    #[test]
    fn test_blank_doi_is_missing() {
        let mut publication = Publication {
            id: 1,
            doi: Some("   ".into()),
            title: "T".into(),
            abstract_text: "A".into(),
            authors: vec![],
            topics: vec![],
        };
        assert!(!publication.has_doi());

        publication.doi = Some(" 10.1/x ".into());
        assert_eq!(publication.doi(), Some("10.1/x"));
    }

    #[test]
    fn test_blank_institution_name_ignored() {
        let author = Author {
            full_name: "A".into(),
            orcid: None,
            position: None,
            institution: Some(Institution { name: "  ".into(), ror_id: None, country: None }),
        };
        assert!(author.named_institution().is_none());
    }
}
