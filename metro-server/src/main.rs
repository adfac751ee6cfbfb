use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use metro_server::cache::RouteCacheConfig;
use metro_server::config::ServerConfig;
use metro_server::feed::{FeedCache, FeedClient, load_snapshot};
use metro_server::network::MetroNetwork;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load station data: disk cache, then upstream, then built-in fallback
    let client = if config.offline {
        None
    } else {
        match FeedClient::new(config.feed.clone()) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "failed to create feed client, running offline");
                None
            }
        }
    };
    let cache = FeedCache::new(config.feed_cache.clone());
    let loaded = load_snapshot(client.as_ref(), &cache).await;
    info!(
        source = %loaded.source,
        records = loaded.snapshot.station_records(),
        "loaded station data"
    );

    let network = match MetroNetwork::build(&loaded.snapshot, &config.network) {
        Ok(network) => network,
        Err(e) => {
            error!(error = %e, "failed to build metro network");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(
        network,
        config.planner.clone(),
        &RouteCacheConfig::default(),
    ) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "invalid planner configuration");
            return ExitCode::FAILURE;
        }
    };
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("Istanbul metro planner listening on http://{}", config.addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    info!("shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
