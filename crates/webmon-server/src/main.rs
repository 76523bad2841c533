//! webmon server
//!
//! - Static content routes: `/`, `/about`, `/status`
//! - Prometheus scrape endpoint: `/metrics`
//! - Background CPU/memory sampler, cancelled on shutdown

use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webmon_core::error::{Result, WebmonError};
use webmon_server::{app_state::AppState, config, host::SysinfoHost, router, sampler};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "webmon-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;
    let window = cfg.sampler.interval();

    // Registry is built here; any registration error stops startup.
    let state = AppState::new(cfg)?;

    let cancel = CancellationToken::new();
    // Detached: the handle is dropped and never joined.
    sampler::spawn(state.metrics().clone(), SysinfoHost::new(), window, cancel.clone());

    let app = router::build_router(state);

    tracing::info!(%listen, window_ms = window.as_millis() as u64, "webmon-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| WebmonError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await
        .map_err(|e| WebmonError::Internal(format!("server failed: {e}")))?;

    tracing::info!("webmon-server stopped");
    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
    cancel.cancel();
}
