use std::sync::Arc;

use crate::config::Config;
use crate::guide::GuideGenerator;
use crate::pipeline::Pipeline;
use crate::store::GuideStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Full generation-delivery pipeline for guide creation requests.
    pub pipeline: Arc<Pipeline>,
    /// Generator alone, for the preview endpoint.
    pub generator: Arc<dyn GuideGenerator>,
    /// Durable store, consulted directly by the retrieval handlers.
    pub store: Arc<dyn GuideStore>,
    /// Reserved for request-time ops knobs; no handler reads it yet.
    #[allow(dead_code)]
    pub config: Config,
}
