//! Pipeline Orchestrator — sequences generation, rendering, delivery and
//! persistence for one request.
//!
//! Flow: GENERATE → RENDER → DELIVER → PERSIST. Generation failure is the
//! only terminal failure; every downstream stage failure is absorbed into
//! the outcome accumulator and the pipeline always reaches PERSIST once a
//! document exists. Each external call is bounded by a configured timeout;
//! a timeout is that stage's failure, never a crash of the request.

pub mod outcome;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::Config;
use crate::guide::{GenerationError, GuideGenerator};
use crate::mailer::DeliveryAgent;
use crate::models::guide::GuideRecord;
use crate::models::profile::UserProfile;
use crate::render::{build_email_html, ArtifactRenderer};
use crate::store::GuideStore;

pub use outcome::{PipelineOutcome, StageStatus};

/// Per-stage timeout budget. Values come from config so ops can tune them
/// without a rebuild.
#[derive(Debug, Clone, Copy)]
pub struct StageTimeouts {
    pub generate: Duration,
    pub render: Duration,
    pub deliver: Duration,
    pub persist: Duration,
}

impl StageTimeouts {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generate: Duration::from_secs(config.generate_timeout_secs),
            render: Duration::from_secs(config.render_timeout_secs),
            deliver: Duration::from_secs(config.deliver_timeout_secs),
            persist: Duration::from_secs(config.persist_timeout_secs),
        }
    }
}

pub struct Pipeline {
    generator: Arc<dyn GuideGenerator>,
    renderer: Arc<dyn ArtifactRenderer>,
    mailer: Arc<dyn DeliveryAgent>,
    store: Arc<dyn GuideStore>,
    timeouts: StageTimeouts,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn GuideGenerator>,
        renderer: Arc<dyn ArtifactRenderer>,
        mailer: Arc<dyn DeliveryAgent>,
        store: Arc<dyn GuideStore>,
        timeouts: StageTimeouts,
    ) -> Self {
        Self {
            generator,
            renderer,
            mailer,
            store,
            timeouts,
        }
    }

    /// Runs the pipeline for one validated profile. Returns `Err` only when
    /// generation itself fails — there is nothing to hand back in that case.
    pub async fn run(&self, profile: UserProfile) -> Result<PipelineOutcome, GenerationError> {
        // GENERATE — the only terminal stage.
        let document = match timeout(self.timeouts.generate, self.generator.generate(&profile))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(GenerationError::ProviderUnavailable(format!(
                    "generation timed out after {}s",
                    self.timeouts.generate.as_secs()
                )))
            }
        };

        let subject = format!("Networking guide for {}", profile.name);
        let html_body = build_email_html(&document, &profile.name);

        // RENDER — failure degrades, the pipeline continues without an artifact.
        let (artifact, render_status) = self.render_stage(&document, &subject).await;

        // DELIVER — attempted iff an artifact exists; at most one attempt.
        let delivery_status = match &artifact {
            Some(bytes) => self.deliver_stage(&profile.email, bytes, &html_body).await,
            None => {
                info!("Delivery skipped: no artifact to attach");
                StageStatus::Skipped
            }
        };

        // PERSIST — the record is created after successful generation even
        // when render or delivery failed; its flags say what was achieved.
        let record = GuideRecord::create(
            profile,
            document,
            artifact.is_some(),
            delivery_status.succeeded(),
        );
        let persistence_status = self.persist_stage(&record).await;
        let guide_id = persistence_status.succeeded().then_some(record.id);

        let outcome = PipelineOutcome {
            record,
            guide_id,
            render: render_status,
            delivery: delivery_status,
            persistence: persistence_status,
        };
        info!("Pipeline finished: {}", outcome.status_message());
        Ok(outcome)
    }

    async fn render_stage(
        &self,
        document: &crate::models::guide::GuideDocument,
        subject: &str,
    ) -> (Option<Bytes>, StageStatus) {
        match timeout(self.timeouts.render, self.renderer.render(document, subject)).await {
            Ok(Ok(bytes)) => {
                info!("Artifact rendered: {} bytes", bytes.len());
                (Some(bytes), StageStatus::Succeeded)
            }
            Ok(Err(e)) => {
                warn!("Render stage failed: {e}");
                (None, StageStatus::failed(e.to_string()))
            }
            Err(_) => {
                warn!("Render stage timed out");
                (
                    None,
                    StageStatus::failed(format!(
                        "rendering timed out after {}s",
                        self.timeouts.render.as_secs()
                    )),
                )
            }
        }
    }

    async fn deliver_stage(&self, to: &str, artifact: &Bytes, html_body: &str) -> StageStatus {
        match timeout(
            self.timeouts.deliver,
            self.mailer.deliver(to, artifact, html_body),
        )
        .await
        {
            Ok(Ok(())) => StageStatus::Succeeded,
            Ok(Err(e)) => {
                warn!("Delivery stage failed: {e}");
                StageStatus::failed(e.to_string())
            }
            Err(_) => {
                warn!("Delivery stage timed out");
                StageStatus::failed(format!(
                    "delivery timed out after {}s",
                    self.timeouts.deliver.as_secs()
                ))
            }
        }
    }

    async fn persist_stage(&self, record: &GuideRecord) -> StageStatus {
        match timeout(self.timeouts.persist, self.store.put(record)).await {
            Ok(Ok(())) => StageStatus::Succeeded,
            Ok(Err(e)) => {
                warn!("Persist stage failed for guide {}: {e}", record.id);
                StageStatus::failed(e.to_string())
            }
            Err(_) => {
                warn!("Persist stage timed out for guide {}", record.id);
                StageStatus::failed(format!(
                    "persistence timed out after {}s",
                    self.timeouts.persist.as_secs()
                ))
            }
        }
    }
}
