//! Outcome accumulator for one pipeline run.
//!
//! Per-stage status is threaded through the pipeline as plain values, and
//! the composite message is a total function of the three stage statuses,
//! so every combination maps to a distinct, accurate sentence.

use serde::Serialize;
use uuid::Uuid;

use crate::models::guide::GuideRecord;

/// Status of one downstream stage (render, delivery, persistence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum StageStatus {
    Succeeded,
    Failed { reason: String },
    /// Not attempted because an upstream stage failed.
    Skipped,
}

impl StageStatus {
    pub fn succeeded(&self) -> bool {
        matches!(self, StageStatus::Succeeded)
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        StageStatus::Failed {
            reason: reason.into(),
        }
    }
}

/// Aggregated result of one request. Exists only for the duration of the
/// request; the durable trace is the [`GuideRecord`] inside.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    /// The full record, returned so the client can cache a fallback copy
    /// at creation time — including when persistence failed.
    pub record: GuideRecord,
    /// Present iff persistence succeeded.
    pub guide_id: Option<Uuid>,
    pub render: StageStatus,
    pub delivery: StageStatus,
    pub persistence: StageStatus,
}

impl PipelineOutcome {
    /// Human-readable composite status. Never claims an action that did not
    /// happen: each stage contributes its own clause.
    pub fn status_message(&self) -> String {
        let render = match &self.render {
            StageStatus::Succeeded => "the PDF was created",
            StageStatus::Failed { .. } => "PDF creation failed",
            StageStatus::Skipped => "PDF creation was skipped",
        };
        let delivery = match &self.delivery {
            StageStatus::Succeeded => "it was emailed to you",
            StageStatus::Failed { .. } => "emailing it failed",
            StageStatus::Skipped => "emailing was skipped (nothing to attach)",
        };
        let persistence = match &self.persistence {
            StageStatus::Succeeded => "the guide was saved for later retrieval",
            StageStatus::Failed { .. } => {
                "saving failed, so keep a copy of this response"
            }
            StageStatus::Skipped => "saving was skipped",
        };
        format!("Guide generated; {render}; {delivery}; {persistence}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guide::test_fixtures::{sample_document, sample_profile};
    use std::collections::HashSet;

    fn outcome_with(render: StageStatus, delivery: StageStatus, persistence: StageStatus) -> PipelineOutcome {
        let record = GuideRecord::create(
            sample_profile(),
            sample_document(),
            render.succeeded(),
            delivery.succeeded(),
        );
        let guide_id = persistence.succeeded().then_some(record.id);
        PipelineOutcome {
            record,
            guide_id,
            render,
            delivery,
            persistence,
        }
    }

    fn all_statuses() -> Vec<StageStatus> {
        vec![
            StageStatus::Succeeded,
            StageStatus::failed("boom"),
            StageStatus::Skipped,
        ]
    }

    #[test]
    fn every_status_combination_yields_a_distinct_message() {
        let mut seen = HashSet::new();
        let mut count = 0;
        for render in all_statuses() {
            for delivery in all_statuses() {
                for persistence in all_statuses() {
                    let message = outcome_with(
                        render.clone(),
                        delivery.clone(),
                        persistence.clone(),
                    )
                    .status_message();
                    assert!(seen.insert(message.clone()), "duplicate message: {message}");
                    count += 1;
                }
            }
        }
        assert_eq!(count, 27);
    }

    #[test]
    fn message_never_claims_email_when_delivery_did_not_succeed() {
        for delivery in [StageStatus::failed("smtp down"), StageStatus::Skipped] {
            let message = outcome_with(
                StageStatus::Succeeded,
                delivery,
                StageStatus::Succeeded,
            )
            .status_message();
            assert!(
                !message.contains("was emailed"),
                "misleading message: {message}"
            );
        }
    }

    #[test]
    fn message_never_claims_saved_when_persistence_failed() {
        let message = outcome_with(
            StageStatus::Succeeded,
            StageStatus::Succeeded,
            StageStatus::failed("table missing"),
        )
        .status_message();
        assert!(!message.contains("was saved"), "misleading message: {message}");
        assert!(message.contains("saving failed"));
    }

    #[test]
    fn stage_status_serializes_with_reason() {
        let value = serde_json::to_value(StageStatus::failed("timed out")).unwrap();
        assert_eq!(value["state"], "failed");
        assert_eq!(value["reason"], "timed out");
    }
}
