mod config;
mod errors;
mod guide;
mod llm_client;
mod mailer;
mod models;
mod pipeline;
mod render;
mod retrieval;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::guide::{GuideGenerator, LlmGuideGenerator};
use crate::llm_client::LlmClient;
use crate::mailer::SmtpDeliveryAgent;
use crate::pipeline::{Pipeline, StageTimeouts};
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{build_dynamo_client, DynamoGuideStore, GuideStore};

/// Fallback filter when RUST_LOG is unset. `CARGO_CRATE_NAME` matches the
/// underscored tracing targets this crate emits (a hyphenated package name
/// would silently match nothing); `tower_http` is included so the request
/// trace layer is visible at the same level.
fn default_env_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "{target}={level},tower_http={level}",
        target = env!("CARGO_CRATE_NAME")
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_env_filter(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coffee-Chat Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize DynamoDB-backed record store
    let dynamo = build_dynamo_client(&config).await;
    let store: Arc<dyn GuideStore> = Arc::new(DynamoGuideStore::new(
        dynamo,
        config.guides_table.clone(),
    ));
    info!("Record store initialized (table: {})", config.guides_table);

    // Initialize LLM client and guide generator
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.generate_timeout_secs),
    );
    let generator: Arc<dyn GuideGenerator> = Arc::new(LlmGuideGenerator::new(llm));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize delivery agent
    let mailer = Arc::new(SmtpDeliveryAgent::new(&config)?);
    info!("Mail transport initialized ({})", config.smtp_host);

    // Assemble the pipeline
    let pipeline = Arc::new(Pipeline::new(
        generator.clone(),
        Arc::new(PdfRenderer),
        mailer,
        store.clone(),
        StageTimeouts::from_config(&config),
    ));

    // Build app state
    let state = AppState {
        pipeline,
        generator,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn default_filter_enables_this_crates_events() {
        let subscriber = tracing_subscriber::registry().with(default_env_filter("info"));
        tracing::subscriber::with_default(subscriber, || {
            // Call-site target starts with CARGO_CRATE_NAME, so this fails
            // if the directive cannot match the crate's own modules.
            assert!(tracing::event_enabled!(Level::INFO));
            assert!(tracing::event_enabled!(
                target: "tower_http::trace::on_request",
                Level::INFO
            ));
            assert!(!tracing::event_enabled!(target: "hyper::client", Level::INFO));
        });
    }
}
