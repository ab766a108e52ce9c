//! SDGraph Assembly
//!
//! Turns flat corpus records into the publication / author / institution /
//! topic / SDG graph consumed by the force-directed visualization, and
//! computes the two chart aggregations shown next to it.
//!
//! Everything here is synchronous and request-scoped: each call owns its
//! node index, edge list and tooltip tracker, and drops them on return.

pub mod builder;
pub mod edge;
pub mod index;
pub mod key;
pub mod node;
pub mod sdg;
pub mod stats;
pub mod tooltip;

pub use builder::{BuildSummary, GraphBuilder};
pub use edge::{EdgeKind, EdgeType, GraphEdge};
pub use key::{Namespace, NodeKey};
pub use node::{GraphNode, NodeKind, NodeType};
pub use sdg::{sdg_display_name, sdg_label, sdg_reference, sdg_reference_entry, SdgReference};
pub use stats::{institution_distribution, sdg_counts, InstitutionShare, SdgCount, OTHER_BUCKET};

use sdgraph_common::config::AssemblyConfig;
use sdgraph_common::corpus::{Publication, SdgMapping};
use sdgraph_common::metrics;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Graph payload as sent to the frontend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphPayload {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

/// Build the full graph for a set of publications
pub fn assemble_graph(
    publications: &[Publication],
    mappings: &[SdgMapping],
    config: &AssemblyConfig,
) -> GraphPayload {
    let started = Instant::now();

    let mut builder = GraphBuilder::new(mappings);
    for publication in publications {
        builder.add_publication(publication);
    }
    let (nodes, links, summary) = builder.finish(config.tooltip_publication_cap);

    metrics::record_graph_build(started.elapsed().as_secs_f64(), summary.nodes, summary.edges);
    metrics::record_skipped_publications("missing_doi", summary.publications_skipped);

    info!(
        publications = summary.publications_seen,
        skipped = summary.publications_skipped,
        nodes = summary.nodes,
        edges = summary.edges,
        "Graph assembled"
    );

    GraphPayload { nodes, links }
}
