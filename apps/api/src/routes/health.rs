use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus whether the in-memory document is ahead of storage.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "unsavedChanges": state.store.has_unsaved_changes(),
        "exportInProgress": state.export_guard.is_busy(),
    }))
}
