mod config;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod store;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{ExportGuard, Rasterizer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, FileStorage};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Load the document (falls back to the demo on first start or unreadable data)
    let storage = FileStorage::in_dir(&config.data_dir);
    info!("Document storage: {}", storage.path().display());
    let store = Arc::new(DocumentStore::load(storage));

    // Font discovery is slow; do it once before accepting requests
    let font_dir = config.font_dir.clone();
    let rasterizer = tokio::task::spawn_blocking(move || {
        Rasterizer::new(font_dir.as_deref(), true)
    })
    .await?;

    let state = AppState {
        store,
        config: config.clone(),
        rasterizer: Arc::new(rasterizer),
        export_guard: Arc::new(ExportGuard::default()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
