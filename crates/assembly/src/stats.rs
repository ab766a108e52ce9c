//! Chart aggregations
//!
//! Two reducers over the same corpus, independent of graph assembly. Neither
//! requires a DOI: every publication the scope returns is counted.

use crate::sdg::sdg_label;
use sdgraph_common::corpus::{Publication, SdgMapping};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Name of the bucket holding institutions outside the top N
pub const OTHER_BUCKET: &str = "Other";

/// One bar of the SDG chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdgCount {
    pub sdg_id: i32,
    pub sdg_name: String,
    pub count: u64,
}

/// One slice of the institution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionShare {
    pub name: String,
    pub value: u64,
}

/// Publication counts per SDG.
///
/// Counts once per (publication, topic, SDG) occurrence, so a publication
/// reaching one SDG through two topics is counted twice. Results are
/// ordered by `sdg_id`.
pub fn sdg_counts(publications: &[Publication], mappings: &[SdgMapping]) -> Vec<SdgCount> {
    let mut topic_sdgs: HashMap<&str, Vec<i32>> = HashMap::new();
    let mut names: HashMap<i32, &str> = HashMap::new();
    for mapping in mappings {
        topic_sdgs
            .entry(mapping.topic_id.as_str())
            .or_default()
            .push(mapping.sdg_id);

        let name = mapping.sdg_name.trim();
        if !name.is_empty() {
            names.entry(mapping.sdg_id).or_insert(name);
        }
    }

    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for publication in publications {
        for topic in &publication.topics {
            for &sdg_id in topic_sdgs.get(topic.topic_id.as_str()).into_iter().flatten() {
                *counts.entry(sdg_id).or_insert(0) += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|(sdg_id, count)| SdgCount {
            sdg_id,
            sdg_name: names
                .get(&sdg_id)
                .map(|name| name.to_string())
                .or_else(|| sdg_label(sdg_id).map(String::from))
                .unwrap_or_else(|| crate::sdg::UNKNOWN_SDG.to_string()),
            count,
        })
        .collect()
}

/// Publications per institution, top `top_n` plus an "Other" bucket.
///
/// Each institution counts at most once per publication. Ties are broken by
/// name so the output is stable.
pub fn institution_distribution(publications: &[Publication], top_n: usize) -> Vec<InstitutionShare> {
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for publication in publications {
        let distinct: HashSet<&str> = publication
            .authors
            .iter()
            .filter_map(|author| author.named_institution())
            .filter_map(|institution| institution.display_name())
            .collect();

        for name in distinct {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let other: u64 = ranked.iter().skip(top_n).map(|(_, count)| count).sum();

    let mut shares: Vec<InstitutionShare> = ranked
        .into_iter()
        .take(top_n)
        .map(|(name, value)| InstitutionShare {
            name: name.to_string(),
            value,
        })
        .collect();

    if other > 0 {
        shares.push(InstitutionShare {
            name: OTHER_BUCKET.to_string(),
            value: other,
        });
    }

    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdgraph_common::corpus::{Author, Institution, TopicAssignment};

    fn author_at(institution: &str) -> Author {
        Author {
            full_name: format!("Someone at {}", institution),
            orcid: None,
            position: None,
            institution: Some(Institution {
                name: institution.into(),
                ror_id: None,
                country: None,
            }),
        }
    }

    fn publication(id: i32, institutions: &[&str], topic_ids: &[&str]) -> Publication {
        Publication {
            id,
            doi: None,
            title: String::new(),
            abstract_text: String::new(),
            authors: institutions.iter().map(|i| author_at(i)).collect(),
            topics: topic_ids
                .iter()
                .map(|t| TopicAssignment {
                    topic_id: t.to_string(),
                    keywords: vec![],
                    topic_probability: 0.5,
                })
                .collect(),
        }
    }

    fn mapping(topic_id: &str, sdg_id: i32, sdg_name: &str) -> SdgMapping {
        SdgMapping {
            topic_id: topic_id.into(),
            sdg_id,
            sdg_name: sdg_name.into(),
            mapping_weight: 1.0,
        }
    }

    #[test]
    fn test_sdg_counts_double_count_through_two_topics() {
        let publications = vec![publication(1, &[], &["a", "b"])];
        let mappings = vec![mapping("a", 13, "Climate Action"), mapping("b", 13, "Climate Action")];

        let counts = sdg_counts(&publications, &mappings);
        assert_eq!(counts, vec![SdgCount { sdg_id: 13, sdg_name: "Climate Action".into(), count: 2 }]);
    }

    #[test]
    fn test_sdg_counts_name_fallback_and_order() {
        let publications = vec![publication(1, &[], &["a", "b", "c"])];
        let mappings = vec![mapping("a", 7, ""), mapping("b", 2, "Hunger"), mapping("c", 30, "")];

        let counts = sdg_counts(&publications, &mappings);
        let rendered: Vec<(i32, &str)> = counts.iter().map(|c| (c.sdg_id, c.sdg_name.as_str())).collect();
        assert_eq!(
            rendered,
            vec![(2, "Hunger"), (7, "Affordable and Clean Energy"), (30, "Unknown SDG")]
        );
    }

    #[test]
    fn test_sdg_counts_ignores_unmapped_topics() {
        let publications = vec![publication(1, &[], &["unmapped"])];
        assert!(sdg_counts(&publications, &[mapping("a", 1, "")]).is_empty());
    }

    #[test]
    fn test_institution_counted_once_per_publication() {
        let publications = vec![publication(1, &["U", "U", " U "], &[])];
        let shares = institution_distribution(&publications, 5);
        assert_eq!(shares, vec![InstitutionShare { name: "U".into(), value: 1 }]);
    }

    #[test]
    fn test_other_bucket_sums_tail() {
        let publications = vec![
            publication(1, &["A", "B", "C"], &[]),
            publication(2, &["A", "B", "D"], &[]),
            publication(3, &["A", "E", "F", "G"], &[]),
        ];

        let shares = institution_distribution(&publications, 3);
        assert_eq!(
            shares,
            vec![
                InstitutionShare { name: "A".into(), value: 3 },
                InstitutionShare { name: "B".into(), value: 2 },
                InstitutionShare { name: "C".into(), value: 1 },
                InstitutionShare { name: OTHER_BUCKET.into(), value: 4 },
            ]
        );

        let total: u64 = shares.iter().map(|s| s.value).sum();
        assert_eq!(total, 3 + 3 + 4);
    }

    #[test]
    fn test_no_other_bucket_when_tail_empty() {
        let publications = vec![publication(1, &["A", "B"], &[])];
        let shares = institution_distribution(&publications, 5);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.name != OTHER_BUCKET));
    }

    #[test]
    fn test_blank_institutions_ignored() {
        let mut p = publication(1, &["  "], &[]);
        p.authors.push(Author { full_name: "No affiliation".into(), orcid: None, position: None, institution: None });
        assert!(institution_distribution(&[p], 5).is_empty());
    }
}
