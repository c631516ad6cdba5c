//! Run the HTTP server until Ctrl-C or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use cura_analysis::TextAnalyzer;
use cura_config::CuraConfig;
use cura_db::service::CuraService;

use crate::api::{AppState, build_router};

/// Open the database, build shared state, and serve until a shutdown signal.
///
/// # Errors
///
/// Fails if the database cannot be opened, the HTTP client cannot be built,
/// or the listen address cannot be bound.
pub async fn serve(config: &CuraConfig) -> anyhow::Result<()> {
    let service = CuraService::new_local(&config.database.path, config.general.clone())
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    let analyzer =
        TextAnalyzer::from_config(&config.keywords).context("failed to build keyword client")?;

    let state = AppState::new(Arc::new(service), Arc::new(analyzer));
    let app = build_router(state, &config.server.cors_origin);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        database = %config.database.path,
        cors_origin = %config.server.cors_origin,
        "CuraLink server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, starting graceful shutdown");
}
