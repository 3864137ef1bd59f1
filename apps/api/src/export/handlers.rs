use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::errors::AppError;
use crate::export::export_pdf;
use crate::state::AppState;

/// POST /api/v1/export/pdf
///
/// Renders the current document and returns it as a PDF attachment. A second
/// request while one export is running gets 409.
pub async fn handle_export_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let permit = state
        .export_guard
        .try_acquire()
        .ok_or(AppError::ExportInProgress)?;

    let doc = state.store.snapshot();
    let rasterizer = state.rasterizer.clone();
    let today = Utc::now().date_naive();

    // Rasterization is CPU-bound; keep it off the async executor.
    let exported = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        export_pdf(&doc, &rasterizer, today)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    let disposition = format!("attachment; filename=\"{}\"", exported.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    )
        .into_response())
}
