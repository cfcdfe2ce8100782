//! News Chat - browser client for the news agent service
//!
//! Holds the conversation with the agent service, serves it as a web page
//! and keeps every open page in sync.

mod api;
mod backend;
mod config;
mod presenter;
mod runtime;
mod state_machine;
mod transcript;

use api::{create_router, AppState};
use backend::{HttpChatBackend, LoggingBackend};
use config::ClientConfig;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    let config = ClientConfig::from_env();

    let http = HttpChatBackend::new(&config.backend_url, config.request_timeout)?;
    tracing::info!(
        backend = %http.base_url(),
        timeout_secs = config.request_timeout.as_secs(),
        "Using agent service"
    );
    let backend = LoggingBackend::new(http);

    // Start the chat runtime; it issues the initial history fetch itself
    let shutdown = CancellationToken::new();
    let (chat, runtime_task) = runtime::start(backend, shutdown.clone());

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(AppState::new(chat))
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("News chat listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    runtime_task.await?;

    Ok(())
}

/// Resolves on Ctrl-C after stopping the runtime
///
/// Stopping the runtime closes the view channel, which ends open event
/// streams so the server can drain.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
    }
    tracing::info!("Shutting down");
    shutdown.cancel();
}
