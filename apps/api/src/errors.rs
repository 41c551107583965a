use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::guide::GenerationError;
use crate::retrieval::ResolveError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only request-terminal failures live here. Stage failures inside the
/// pipeline are folded into the outcome, not raised as errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound => {
                AppError::NotFound("Guide not found in store or cache".to_string())
            }
            ResolveError::Unavailable(reason) => AppError::StoreUnavailable(reason),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                match e {
                    GenerationError::ProviderAuth(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIGURATION_ERROR",
                        "Model provider credentials are missing or rejected".to_string(),
                    ),
                    GenerationError::ProviderUnavailable(_) => (
                        StatusCode::BAD_GATEWAY,
                        "PROVIDER_UNAVAILABLE",
                        "The guide generator is temporarily unavailable".to_string(),
                    ),
                    GenerationError::MalformedResponse(_) => (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_MODEL_RESPONSE",
                        "The guide generator returned an unusable response".to_string(),
                    ),
                }
            }
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The guide store is temporarily unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_unavailable_map_to_distinct_statuses() {
        let not_found: AppError = ResolveError::NotFound.into();
        let unavailable: AppError = ResolveError::Unavailable("table missing".to_string()).into();
        let a = not_found.into_response().status();
        let b = unavailable.into_response().status();
        assert_eq!(a, StatusCode::NOT_FOUND);
        assert_eq!(b, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn credential_faults_map_to_configuration_error() {
        let err = AppError::Generation(GenerationError::ProviderAuth("401".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let err = AppError::Generation(GenerationError::ProviderUnavailable("529".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
