//! SDG tooltip aggregation
//!
//! The builder records every (topic, publication) contribution as it walks
//! the corpus. For each SDG reached by the graph, the contributions of all
//! topics mapping to it are merged here, deduplicated by publication and
//! rendered into bounded hover text.

use crate::key::NodeKey;
use crate::sdg::sdg_display_name;
use sdgraph_common::corpus::Author;
use std::collections::HashSet;
use std::fmt::Write;

/// One publication's contribution through one topic
#[derive(Debug, Clone)]
pub struct TopicContribution {
    /// Global order in which the builder saw this contribution
    pub seq: usize,
    /// DOI key of the publication node, shared by rows with the same DOI
    pub publication: NodeKey,
    pub title: String,
    pub authors: Vec<Author>,
    pub keywords: Vec<String>,
    pub probability: f64,
}

/// Merge contributions from several topics into distinct publications,
/// ordered by first appearance in the corpus walk
pub fn distinct_publications<'a, I>(contributions: I) -> Vec<&'a TopicContribution>
where
    I: IntoIterator<Item = &'a TopicContribution>,
{
    let mut all: Vec<&TopicContribution> = contributions.into_iter().collect();
    all.sort_by_key(|c| c.seq);

    let mut seen = HashSet::new();
    all.retain(|&c| seen.insert(&c.publication));
    all
}

/// Render the hover text for one SDG node.
///
/// At most `cap` publications are written out; the remainder is summarized
/// on a trailing line.
pub fn render_sdg_tooltip(sdg_id: i32, publications: &[&TopicContribution], cap: usize) -> String {
    let mut out = sdg_display_name(sdg_id);

    for (i, publication) in publications.iter().take(cap).enumerate() {
        out.push_str("\n\n");
        write_publication_block(&mut out, i + 1, publication);
    }

    let remaining = publications.len().saturating_sub(cap);
    if remaining > 0 {
        let _ = write!(out, "\n\n...and {} other publications", remaining);
    }

    out
}

fn write_publication_block(out: &mut String, number: usize, publication: &TopicContribution) {
    let _ = write!(out, "{}. {}", number, publication.title.trim());

    for author in &publication.authors {
        let Some(name) = author.display_name() else {
            continue;
        };
        let _ = write!(out, "\n   - {}", name);
        if let Some(name) = author.named_institution().and_then(|i| i.display_name()) {
            let _ = write!(out, " ({})", name);
        }
    }

    if !publication.keywords.is_empty() {
        let _ = write!(out, "\n   Keywords: {}", publication.keywords.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdgraph_common::corpus::Institution;

    fn contribution(seq: usize, publication_id: i32, title: &str) -> TopicContribution {
        TopicContribution {
            seq,
            publication: NodeKey::publication(&format!("10.1/{}", publication_id)),
            title: title.into(),
            authors: vec![],
            keywords: vec![],
            probability: 0.5,
        }
    }

    #[test]
    fn test_distinct_publications_keeps_first_seen_order() {
        // topic A saw publications 2 then 3, topic B saw 1 then 2
        let topic_a = vec![contribution(1, 2, "B"), contribution(4, 3, "C")];
        let topic_b = vec![contribution(0, 1, "A"), contribution(2, 2, "B")];

        let merged = distinct_publications(topic_a.iter().chain(topic_b.iter()));
        let titles: Vec<&str> = merged.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rows_sharing_doi_listed_once() {
        let mut first = contribution(0, 1, "First row");
        let mut second = contribution(1, 2, "Second row");
        first.publication = NodeKey::publication("10.1/same");
        second.publication = NodeKey::publication(" 10.1/same ");

        let merged = distinct_publications([&first, &second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "First row");
    }

    #[test]
    fn test_nameless_author_line_omitted() {
        let mut c = contribution(0, 1, "Paper");
        c.authors = vec![
            Author { full_name: " ".into(), orcid: Some("0000-0003".into()), position: None, institution: None },
            Author { full_name: "Budi Santoso".into(), orcid: None, position: None, institution: None },
        ];

        let text = render_sdg_tooltip(13, &[&c], 3);
        assert_eq!(text, "SDG 13 - Climate Action\n\n1. Paper\n   - Budi Santoso");
    }

    #[test]
    fn test_render_block() {
        let mut c = contribution(0, 1, "Sustainable Agriculture Innovation");
        c.authors = vec![
            Author {
                full_name: "Intan Permata".into(),
                orcid: None,
                position: Some(1),
                institution: Some(Institution {
                    name: "Universitas Airlangga".into(),
                    ror_id: None,
                    country: Some("Indonesia".into()),
                }),
            },
            Author {
                full_name: "Budi Santoso".into(),
                orcid: None,
                position: Some(2),
                institution: None,
            },
        ];
        c.keywords = vec!["soil".into(), "yield".into()];

        let text = render_sdg_tooltip(2, &[&c], 3);
        assert_eq!(
            text,
            "SDG 2 - Zero Hunger\n\n\
             1. Sustainable Agriculture Innovation\n   \
             - Intan Permata (Universitas Airlangga)\n   \
             - Budi Santoso\n   \
             Keywords: soil, yield"
        );
    }

    #[test]
    fn test_render_truncates_after_cap() {
        let contributions: Vec<TopicContribution> =
            (0..5).map(|i| contribution(i, i as i32, &format!("Paper {}", i))).collect();
        let refs: Vec<&TopicContribution> = contributions.iter().collect();

        let text = render_sdg_tooltip(13, &refs, 3);
        assert!(text.starts_with("SDG 13 - Climate Action"));
        assert!(text.contains("3. Paper 2"));
        assert!(!text.contains("Paper 3"));
        assert!(text.ends_with("...and 2 other publications"));
    }

    #[test]
    fn test_render_at_cap_has_no_trailer() {
        let contributions: Vec<TopicContribution> =
            (0..3).map(|i| contribution(i, i as i32, "P")).collect();
        let refs: Vec<&TopicContribution> = contributions.iter().collect();

        assert!(!render_sdg_tooltip(13, &refs, 3).contains("other publications"));
    }

    #[test]
    fn test_unknown_sdg_header() {
        assert_eq!(render_sdg_tooltip(99, &[], 3), "SDG 99 - Unknown SDG");
    }
}
