//! Record Store — create-only persistence of guide records, keyed by the
//! identifier generated at creation time.
//!
//! `get` must keep "does not exist" (Ok(None)) apart from "could not check"
//! (InfrastructureFailure): the retrieval path renders different messages
//! for each.

pub mod dynamo;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::guide::GuideRecord;

pub use dynamo::{build_dynamo_client, DynamoGuideStore};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A `put` that did not land. Non-fatal to the pipeline.
    #[error("record write failed: {0}")]
    WriteFailure(String),

    /// Table missing, access denied, transport fault — the store could not
    /// be consulted at all.
    #[error("record store infrastructure failure: {0}")]
    InfrastructureFailure(String),
}

/// Seam for the orchestrator and retrieval service. `put` is create-only:
/// callers generate a fresh identifier per record, and the store is never
/// asked to update or delete.
#[async_trait]
pub trait GuideStore: Send + Sync {
    async fn put(&self, record: &GuideRecord) -> Result<(), StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<GuideRecord>, StoreError>;
}
