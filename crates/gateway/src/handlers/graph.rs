//! Knowledge graph handler

use axum::{extract::State, Json};
use tracing::info_span;

use crate::AppState;
use sdgraph_assembly::{assemble_graph, GraphPayload};
use sdgraph_common::{
    auth::{resolve_current_user, AuthContext},
    db::CorpusScope,
    errors::Result,
};

/// Graph of the current user's corpus
pub async fn graph_data(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<GraphPayload>> {
    let user = resolve_current_user(state.store.as_ref(), &auth).await?;

    let publications = state
        .store
        .fetch_publications(&CorpusScope::user(user.id.as_str()))
        .await?;
    let mappings = state.store.fetch_sdg_mappings().await?;

    let payload = info_span!(
        "assemble_graph",
        user = %user.display_name,
        request_id = %auth.request_id
    )
    .in_scope(|| assemble_graph(&publications, &mappings, &state.config.assembly));

    Ok(Json(payload))
}
