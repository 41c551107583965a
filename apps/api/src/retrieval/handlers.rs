use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::guide::GuideRecord;
use crate::retrieval::{resolve, RecordSource};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideResponse {
    pub guide: GuideRecord,
    pub source: RecordSource,
}

/// GET /api/v1/guides/:id
///
/// Durable lookup only. 404 means the record does not exist; a store fault
/// surfaces as 503 so the client can distinguish "removed" from
/// "temporarily unavailable".
pub async fn handle_get_guide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GuideResponse>, AppError> {
    match state.store.get(id).await {
        Ok(Some(guide)) => Ok(Json(GuideResponse {
            guide,
            source: RecordSource::Store,
        })),
        Ok(None) => Err(AppError::NotFound(format!("Guide {id} not found"))),
        Err(e) => Err(AppError::StoreUnavailable(e.to_string())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// The copy the client cached at creation time, if it still has one.
    #[serde(default)]
    pub cached_record: Option<GuideRecord>,
}

/// POST /api/v1/guides/:id/resolve
///
/// Two-source resolution: durable store first, then the caller's cached
/// copy. The response names the source that answered.
pub async fn handle_resolve_guide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<GuideResponse>, AppError> {
    let resolved = resolve(state.store.as_ref(), id, request.cached_record).await?;
    Ok(Json(GuideResponse {
        guide: resolved.record,
        source: resolved.source,
    }))
}
