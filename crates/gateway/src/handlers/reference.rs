//! SDG reference data

use axum::{
    extract::{Path, State},
    Json,
};

use crate::AppState;
use sdgraph_assembly::{sdg_reference, sdg_reference_entry, SdgReference};
use sdgraph_common::{
    auth::{resolve_current_user, AuthContext},
    corpus::SdgMapping,
    errors::{AppError, Result},
};

/// The 17 SDGs and their labels
pub async fn list_sdgs(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<SdgReference>>> {
    resolve_current_user(state.store.as_ref(), &auth).await?;
    Ok(Json(sdg_reference()))
}

/// One SDG by goal number
pub async fn get_sdg(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(sdg_id): Path<i32>,
) -> Result<Json<SdgReference>> {
    resolve_current_user(state.store.as_ref(), &auth).await?;

    sdg_reference_entry(sdg_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            resource_type: "sdg".to_string(),
            id: sdg_id.to_string(),
        })
}

/// The global topic -> SDG mapping table
pub async fn list_sdg_mappings(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<SdgMapping>>> {
    resolve_current_user(state.store.as_ref(), &auth).await?;
    Ok(Json(state.store.fetch_sdg_mappings().await?))
}
