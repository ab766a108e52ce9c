//! Corpus listing handler

use axum::{extract::State, Json};

use crate::AppState;
use sdgraph_common::{
    auth::{resolve_current_user, AuthContext},
    corpus::Publication,
    db::CorpusScope,
    errors::Result,
};

/// The current user's publications, with parsed authors and topics
pub async fn list_publications(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<Publication>>> {
    let user = resolve_current_user(state.store.as_ref(), &auth).await?;

    let publications = state
        .store
        .fetch_publications(&CorpusScope::user(user.id.as_str()))
        .await?;
    tracing::debug!(user = %user.display_name, count = publications.len(), "Publications listed");

    Ok(Json(publications))
}
