//! Content Generator — turns a validated profile into a typed GuideDocument.
//!
//! Flow: build prompt → single LLM call → parse JSON → shape validation.
//! A reply that is not valid JSON, or that parses but violates the mandated
//! list bounds, is a malformed response. Nothing is retried here.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::guide::prompts::{build_guide_prompt, GUIDE_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::guide::GuideDocument;
use crate::models::profile::UserProfile;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Credential/config class of provider failure — the operator's problem.
    #[error("model provider rejected credentials: {0}")]
    ProviderAuth(String),

    /// Transient class — transport failure, timeout, rate limit, 5xx.
    #[error("model provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered, but not with a usable guide.
    #[error("model response did not match the guide shape: {0}")]
    MalformedResponse(String),
}

/// Seam for the orchestrator: lets pipeline tests substitute a stub.
#[async_trait]
pub trait GuideGenerator: Send + Sync {
    async fn generate(&self, profile: &UserProfile) -> Result<GuideDocument, GenerationError>;
}

/// Production generator backed by the shared [`LlmClient`].
pub struct LlmGuideGenerator {
    llm: LlmClient,
}

impl LlmGuideGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl GuideGenerator for LlmGuideGenerator {
    async fn generate(&self, profile: &UserProfile) -> Result<GuideDocument, GenerationError> {
        let prompt = build_guide_prompt(profile);

        let document: GuideDocument = self
            .llm
            .call_json(&prompt, GUIDE_SYSTEM)
            .await
            .map_err(classify_llm_error)?;

        if let Err(violations) = document.check_shape() {
            warn!("Generated guide failed shape validation: {violations}");
            return Err(GenerationError::MalformedResponse(violations));
        }

        info!(
            "Guide generated: {} strengths, {} focus areas, {} steps, {} starters",
            document.key_strengths.len(),
            document.areas_to_focus.len(),
            document.actionable_steps.len(),
            document.conversation_starters.len()
        );

        Ok(document)
    }
}

/// Folds transport-level errors into the generation taxonomy. Credential
/// faults stay distinguishable from transient outages; anything the provider
/// returned with HTTP success but unusable content is a malformed response.
fn classify_llm_error(err: LlmError) -> GenerationError {
    match err {
        LlmError::Auth { status, message } => {
            GenerationError::ProviderAuth(format!("status {status}: {message}"))
        }
        LlmError::Http(e) => GenerationError::ProviderUnavailable(e.to_string()),
        LlmError::Api { status, message } => {
            GenerationError::ProviderUnavailable(format!("status {status}: {message}"))
        }
        LlmError::Parse(e) => {
            GenerationError::MalformedResponse(format!("reply was not valid guide JSON: {e}"))
        }
        LlmError::EmptyContent => {
            GenerationError::MalformedResponse("reply contained no text content".to_string())
        }
    }
}
