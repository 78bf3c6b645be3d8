use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use train_dashboard::config::DashboardConfig;
use train_dashboard::feed::{FeedClient, MockFeed, Poller, PollerHandle, TrainSnapshot};
use train_dashboard::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Start polling before serving so the first page has a chance of data.
    let snapshot = TrainSnapshot::new();
    let poller = match start_poller(&config, snapshot.clone()) {
        Ok(handle) => handle,
        Err(message) => {
            error!(%message, "failed to start train feed");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.bind_addr;
    let app = create_router(AppState::new(snapshot, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            poller.shutdown().await;
            return ExitCode::FAILURE;
        }
    };

    info!("Train dashboard listening on http://{addr}");
    info!("  GET  /             - Dashboard");
    info!("  GET  /board        - Category tables (HTML fragment or JSON)");
    info!("  GET  /export.pdf   - PDF export");
    info!("  GET  /health       - Health check");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    poller.shutdown().await;
    info!("poller stopped");

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server error");
            ExitCode::FAILURE
        }
    }
}

/// Spawn the poller against the live feed, or the mock file if configured.
fn start_poller(config: &DashboardConfig, snapshot: TrainSnapshot) -> Result<PollerHandle, String> {
    match &config.mock_data {
        Some(path) => {
            let source = MockFeed::from_file(path).map_err(|e| e.to_string())?;
            info!(path = %path.display(), "serving trains from mock data");
            Ok(Poller::new(source, snapshot, config.poll_interval)
                .with_overlap(config.fetch_overlap)
                .spawn())
        }
        None => {
            let source = FeedClient::new(config.feed_client_config()).map_err(|e| e.to_string())?;
            info!(
                url = source.url(),
                interval_ms = config.poll_interval.as_millis() as u64,
                overlap = ?config.fetch_overlap,
                "polling train feed"
            );
            Ok(Poller::new(source, snapshot, config.poll_interval)
                .with_overlap(config.fetch_overlap)
                .spawn())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
