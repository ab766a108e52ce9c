//! Chart data handlers

use axum::{extract::State, Json};

use crate::AppState;
use sdgraph_assembly::stats::{self as aggregate, InstitutionShare, SdgCount};
use sdgraph_common::{
    auth::{resolve_current_user, AuthContext},
    db::CorpusScope,
    errors::Result,
};

/// Bar chart: publications per SDG
pub async fn sdg_counts(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<SdgCount>>> {
    let user = resolve_current_user(state.store.as_ref(), &auth).await?;

    let publications = state
        .store
        .fetch_publications(&CorpusScope::user(user.id.as_str()))
        .await?;
    let mappings = state.store.fetch_sdg_mappings().await?;

    let counts = aggregate::sdg_counts(&publications, &mappings);
    tracing::debug!(user = %user.display_name, sdgs = counts.len(), "SDG counts computed");

    Ok(Json(counts))
}

/// Pie chart: publications per institution
pub async fn institution_distribution(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<InstitutionShare>>> {
    let user = resolve_current_user(state.store.as_ref(), &auth).await?;

    let publications = state
        .store
        .fetch_publications(&CorpusScope::user(user.id.as_str()))
        .await?;

    let shares = aggregate::institution_distribution(&publications, state.config.assembly.institution_top_n);
    tracing::debug!(user = %user.display_name, slices = shares.len(), "Institution distribution computed");

    Ok(Json(shares))
}
