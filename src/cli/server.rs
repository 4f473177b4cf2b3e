use std::sync::Arc;

use agrolead_content::{CachedContentSource, ContentSource, HttpContentSource};
use agrolead_lead::{HttpTransport, LeadTransport};
use anyhow::Result;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::routes::AppState;

pub async fn serve(
    config: crate::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting agrolead server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let transport: Arc<dyn LeadTransport> = Arc::new(HttpTransport::new(
        config.submission.endpoint.to_owned(),
        config.submission.timeout(),
    )?);

    let content: Option<Arc<dyn ContentSource>> = if config.content.is_enabled() {
        let source = HttpContentSource::new(config.content.http())?;
        tracing::info!(
            base_url = %config.content.base_url,
            revalidate_secs = config.content.revalidate_secs,
            cache_capacity = config.content.cache_capacity,
            "Content source enabled"
        );
        Some(Arc::new(CachedContentSource::with_capacity(
            source,
            config.content.cache_capacity,
        )))
    } else {
        tracing::info!("Content source disabled, using static product defaults");
        None
    };

    let state = AppState {
        config,
        transport,
        content,
    };

    let app = crate::routes::router(state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    let shutdown_signal = async {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!("failed to install SIGTERM handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C signal");
            },
            _ = terminate => {
                tracing::info!("Received SIGTERM signal");
            },
        }

        tracing::info!("Starting graceful shutdown...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
