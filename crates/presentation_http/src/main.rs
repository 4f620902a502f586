//! WordSprout HTTP server
//!
//! Main entry point: wires the speech, coaching and cache adapters into the
//! pipeline and serves the WebSocket and REST endpoints.

use std::sync::Arc;

use application::ports::{ChildProfileStore, SynthesisPort, TranscriptionPort};
use application::services::{InteractionService, PipelineConfig, ResponseGenerator, SessionManager};
use infrastructure::adapters::{CoachingAdapter, RecognitionAdapter, SynthesisAdapter};
use infrastructure::cache::{SynthesisCache, SynthesisCacheConfig};
use infrastructure::persistence::{seed_profiles, InMemoryProfileStore};
use infrastructure::AppConfig;
use presentation_http::{create_router, AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Upper bound for inbound request bodies; audio uploads dominate
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordsprout=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("WordSprout v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });
    info!(
        host = %config.server.host,
        port = config.server.port,
        privacy_mode = config.pipeline.privacy_mode,
        "Configuration loaded"
    );

    let cache = Arc::new(
        SynthesisCache::open(SynthesisCacheConfig {
            dir: config.cache.dir.clone().into(),
            max_capacity_mb: config.cache.max_capacity_mb,
        })
        .await?,
    );

    let recognition: Arc<dyn TranscriptionPort> = Arc::new(
        RecognitionAdapter::new(config.recognition.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize recognition: {e}"))?,
    );
    let synthesis: Arc<dyn SynthesisPort> = Arc::new(
        SynthesisAdapter::new(config.synthesis.clone(), Arc::clone(&cache))
            .map_err(|e| anyhow::anyhow!("Failed to initialize synthesis: {e}"))?,
    );
    let coaching = CoachingAdapter::new(config.coaching.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize coaching: {e}"))?;

    let interactions = InteractionService::with_config(
        Arc::clone(&recognition),
        Arc::clone(&synthesis),
        ResponseGenerator::new(Arc::new(coaching)),
        PipelineConfig {
            privacy_mode: config.pipeline.privacy_mode,
            ..PipelineConfig::default()
        },
    );

    let profiles: Arc<dyn ChildProfileStore> = Arc::new(InMemoryProfileStore::new());
    let seeded = seed_profiles(profiles.as_ref(), &config.profiles)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to provision child profiles: {e}"))?;
    info!(seeded, "Child profiles provisioned");

    let state = AppState {
        interactions: Arc::new(interactions),
        sessions: Arc::new(SessionManager::new()),
        profiles,
        synthesis,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
