//! Document Renderer — turns a GuideDocument into a fixed-layout PDF and an
//! HTML email summary. Deterministic given identical inputs: no randomness,
//! no external calls at this layer. Render failure degrades the pipeline
//! outcome, it never aborts the request.

pub mod email;
pub mod pdf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::guide::GuideDocument;

pub use email::build_email_html;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render engine failure: {0}")]
    EngineFailure(String),
}

/// Seam for the orchestrator: lets pipeline tests substitute a stub.
#[async_trait]
pub trait ArtifactRenderer: Send + Sync {
    async fn render(&self, doc: &GuideDocument, subject: &str) -> Result<Bytes, RenderError>;
}

/// Production renderer. The PDF work is CPU-bound, so it runs on the
/// blocking pool rather than stalling the request executor.
pub struct PdfRenderer;

#[async_trait]
impl ArtifactRenderer for PdfRenderer {
    async fn render(&self, doc: &GuideDocument, subject: &str) -> Result<Bytes, RenderError> {
        let doc = doc.clone();
        let subject = subject.to_string();
        let bytes = tokio::task::spawn_blocking(move || pdf::render_pdf(&doc, &subject))
            .await
            .map_err(|e| RenderError::EngineFailure(format!("render task panicked: {e}")))??;
        Ok(Bytes::from(bytes))
    }
}
