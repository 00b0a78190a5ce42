use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use catalog::DatasetCatalog;
use dashboard::RenderSettings;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;

use config::ServerConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    catalog: Arc<DatasetCatalog>,
    settings: Arc<RenderSettings>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    let state = AppState {
        catalog: Arc::new(DatasetCatalog::new(&config.data_file)),
        settings: Arc::new(config.render.clone()),
    };

    // Warm the cache so the first request does not pay for parsing. A missing
    // file is not fatal here: requests report it until the file shows up.
    match state.catalog.dataset() {
        Ok(dataset) => info!(
            "dataset ready: {} facilities (version {})",
            dataset.table.len(),
            dataset.version
        ),
        Err(err) => warn!("dataset not loaded at startup: {err}"),
    }

    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}: {err}", config.addr);
            std::process::exit(1);
        }
    };

    info!("plants dashboard listening on http://{}", config.addr);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
        std::process::exit(1);
    }
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(api::healthz))
        .route("/api/controls", get(api::get_controls))
        .route(
            "/api/dashboard",
            get(api::get_dashboard).post(api::post_dashboard),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
    }
    info!("shutting down");
}
