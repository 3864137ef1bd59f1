use std::sync::Arc;

use crate::config::Config;
use crate::export::{ExportGuard, Rasterizer};
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Sole owner of the resume document. Handlers read snapshots or call its operations.
    pub store: Arc<DocumentStore>,
    pub config: Config,
    /// Font database is loaded once at startup; rasterization runs on blocking workers.
    pub rasterizer: Arc<Rasterizer>,
    /// Rejects a second export while one is in flight.
    pub export_guard: Arc<ExportGuard>,
}
