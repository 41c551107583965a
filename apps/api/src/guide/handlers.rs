use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::guide::{GuideDocument, GuideRecord};
use crate::models::profile::UserProfile;
use crate::pipeline::{PipelineOutcome, StageStatus};
use crate::state::AppState;

/// Per-stage statuses as they appear on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub render: StageStatus,
    pub email: StageStatus,
    pub persistence: StageStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuideResponse {
    pub message: String,
    /// Present iff the guide was saved; null tells the client to rely on
    /// the `record` copy it should cache.
    pub guide_id: Option<Uuid>,
    pub guide_content: GuideDocument,
    /// Full record for the client-side fallback cache, written once at
    /// creation time.
    pub record: GuideRecord,
    pub stages: StageReport,
}

impl From<PipelineOutcome> for CreateGuideResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        Self {
            message: outcome.status_message(),
            guide_id: outcome.guide_id,
            guide_content: outcome.record.guide_content.clone(),
            record: outcome.record,
            stages: StageReport {
                render: outcome.render,
                email: outcome.delivery,
                persistence: outcome.persistence,
            },
        }
    }
}

/// POST /api/v1/guides
///
/// Validates the profile at the boundary, then runs the full pipeline.
/// Degraded outcomes (render/email/save failures) still return 200 with an
/// honest composite message; only generation failure is an error response.
pub async fn handle_create_guide(
    State(state): State<AppState>,
    Json(mut profile): Json<UserProfile>,
) -> Result<Json<CreateGuideResponse>, AppError> {
    profile.trim();
    profile
        .validate()
        .map_err(|errors| AppError::Validation(errors.join("; ")))?;

    let outcome = state.pipeline.run(profile).await?;
    Ok(Json(CreateGuideResponse::from(outcome)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewGuideResponse {
    pub message: String,
    pub guide_content: GuideDocument,
}

/// POST /api/v1/guides/preview
///
/// Generation only: no PDF, no email, no persistence. Used by the client
/// to show a guide before the user commits to the full pipeline.
pub async fn handle_preview_guide(
    State(state): State<AppState>,
    Json(mut profile): Json<UserProfile>,
) -> Result<Json<PreviewGuideResponse>, AppError> {
    profile.trim();
    profile
        .validate()
        .map_err(|errors| AppError::Validation(errors.join("; ")))?;

    let guide_content = state.generator.generate(&profile).await?;
    Ok(Json(PreviewGuideResponse {
        message: "Guide generated successfully".to_string(),
        guide_content,
    }))
}
