//! Serve command
//!
//! Boot sequence: parse config, open the store, serve until a shutdown
//! signal, then close the store.

use std::sync::Arc;

use tokio::signal;

use super::args::Cli;
use super::errors::{CliError, CliResult};
use crate::http_server::{HttpServer, TrackerState};
use crate::observability::{log_event, Event};
use crate::storage::DocumentStore;

/// Runs the server until SIGINT or SIGTERM.
pub async fn run(cli: Cli) -> CliResult<()> {
    log_event(Event::BootStart);

    let store_config = cli
        .store_config()
        .map_err(|e| CliError::Config(e.to_string()))?;
    log_event(Event::ConfigLoaded);

    let store = Arc::new(DocumentStore::open(&store_config)?);
    tracing::info!(
        event = Event::StoreOpened.as_str(),
        durable = store.config().is_durable(),
        "store opened"
    );

    let state = Arc::new(TrackerState::new(store.clone()));
    let server = HttpServer::new(cli.http_config(), state);
    let served = server.start(shutdown_signal()).await;

    // Close the store even when serving failed.
    let closed = store.close();
    log_event(Event::StoreClosed);

    served?;
    closed?;

    log_event(Event::ShutdownComplete);
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => tracing::info!(event = Event::ShutdownStart.as_str(), signal = "SIGINT"),
        _ = terminate => tracing::info!(event = Event::ShutdownStart.as_str(), signal = "SIGTERM"),
    }
}
