//! Graph builder
//!
//! Walks publications and their embedded author and topic lists, filling a
//! request-scoped `NodeIndex` and edge list. SDG nodes are materialized in
//! `finish`, only for SDGs some `MAPS_TO_SDG` edge actually reached.

use crate::edge::{EdgeKind, GraphEdge};
use crate::index::NodeIndex;
use crate::key::NodeKey;
use crate::node::{GraphNode, NodeKind, NodePatch};
use crate::sdg::sdg_display_name;
use crate::tooltip::{distinct_publications, render_sdg_tooltip, TopicContribution};
use sdgraph_common::corpus::{Publication, SdgMapping, TopicAssignment};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A topic's link to one SDG, from the reference table
#[derive(Debug, Clone)]
struct SdgLink {
    sdg_id: i32,
    weight: f64,
}

/// Counters reported once the walk is over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub publications_seen: usize,
    pub publications_skipped: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Request-scoped graph accumulator
pub struct GraphBuilder {
    topic_sdgs: HashMap<String, Vec<SdgLink>>,
    index: NodeIndex,
    edges: Vec<GraphEdge>,
    tracker: HashMap<String, Vec<TopicContribution>>,
    reached: BTreeMap<i32, Vec<String>>,
    seq: usize,
    summary: BuildSummary,
}

impl GraphBuilder {
    /// Index the global mapping table by topic
    pub fn new(mappings: &[SdgMapping]) -> Self {
        let mut topic_sdgs: HashMap<String, Vec<SdgLink>> = HashMap::new();
        for mapping in mappings {
            topic_sdgs
                .entry(mapping.topic_id.clone())
                .or_default()
                .push(SdgLink {
                    sdg_id: mapping.sdg_id,
                    weight: mapping.mapping_weight,
                });
        }

        Self {
            topic_sdgs,
            index: NodeIndex::new(),
            edges: Vec::new(),
            tracker: HashMap::new(),
            reached: BTreeMap::new(),
            seq: 0,
            summary: BuildSummary::default(),
        }
    }

    /// Add one publication; returns false if it was left out for lack of a DOI
    pub fn add_publication(&mut self, publication: &Publication) -> bool {
        self.summary.publications_seen += 1;

        let Some(doi) = publication.doi() else {
            self.summary.publications_skipped += 1;
            debug!(publication_id = publication.id, "Skipping publication without DOI");
            return false;
        };

        let publication_key = NodeKey::publication(doi);
        self.index.upsert(
            publication_key.clone(),
            NodeKind::Publication {
                title: publication.title.clone(),
                abstract_text: publication.abstract_text.clone(),
            },
        );

        self.add_authors(&publication_key, publication);

        for topic in &publication.topics {
            self.add_topic(&publication_key, publication, topic);
        }

        true
    }

    fn add_authors(&mut self, publication_key: &NodeKey, publication: &Publication) {
        for author in &publication.authors {
            let Some(author_key) = NodeKey::author(author) else {
                debug!(publication_id = publication.id, "Skipping author without name or ORCID");
                continue;
            };
            self.index.upsert(
                author_key.clone(),
                NodeKind::Author {
                    full_name: author.full_name.clone(),
                },
            );
            self.edges.push(GraphEdge::new(
                publication_key.clone(),
                author_key.clone(),
                EdgeKind::AuthoredBy {
                    position: author.position,
                },
            ));

            if let Some(institution) = author.named_institution() {
                let institution_key = NodeKey::institution(institution);
                self.index.upsert(
                    institution_key.clone(),
                    NodeKind::Institution {
                        name: institution.name.trim().to_string(),
                        country: institution.country.clone(),
                    },
                );
                self.edges.push(GraphEdge::new(
                    author_key,
                    institution_key,
                    EdgeKind::AffiliatedWith,
                ));
            }
        }
    }

    fn add_topic(&mut self, publication_key: &NodeKey, publication: &Publication, topic: &TopicAssignment) {
        let topic_key = NodeKey::topic(&topic.topic_id);
        self.index.upsert(
            topic_key.clone(),
            NodeKind::Topic {
                keywords: topic.keywords.clone(),
            },
        );
        self.edges.push(GraphEdge::new(
            publication_key.clone(),
            topic_key.clone(),
            EdgeKind::has_topic(topic.topic_probability),
        ));

        self.tracker
            .entry(topic.topic_id.clone())
            .or_default()
            .push(TopicContribution {
                seq: self.seq,
                publication: publication_key.clone(),
                title: publication.title.clone(),
                authors: publication.authors.clone(),
                keywords: topic.keywords.clone(),
                probability: topic.topic_probability,
            });
        self.seq += 1;

        let Some(links) = self.topic_sdgs.get(&topic.topic_id) else {
            return;
        };

        for link in links {
            self.edges.push(GraphEdge::new(
                topic_key.clone(),
                NodeKey::sdg(link.sdg_id),
                EdgeKind::MapsToSdg {
                    mapping_weight: link.weight,
                },
            ));

            let topics = self.reached.entry(link.sdg_id).or_default();
            if !topics.contains(&topic.topic_id) {
                topics.push(topic.topic_id.clone());
            }
        }
    }

    /// Materialize reached SDG nodes with their tooltips and hand back the graph
    pub fn finish(mut self, tooltip_cap: usize) -> (Vec<GraphNode>, Vec<GraphEdge>, BuildSummary) {
        for (&sdg_id, topic_ids) in &self.reached {
            let contributions = topic_ids
                .iter()
                .filter_map(|topic_id| self.tracker.get(topic_id))
                .flatten();
            let publications = distinct_publications(contributions);
            let tooltip = render_sdg_tooltip(sdg_id, &publications, tooltip_cap);

            self.index.upsert_merge(
                NodeKey::sdg(sdg_id),
                NodeKind::Sdg {
                    sdg_id,
                    name: sdg_display_name(sdg_id),
                },
                NodePatch::tooltip(tooltip),
            );
        }

        self.summary.nodes = self.index.len();
        self.summary.edges = self.edges.len();

        (self.index.into_nodes(), self.edges, self.summary)
    }
}
