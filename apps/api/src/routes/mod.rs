pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, patch, post, put},
    Router,
};

use crate::errors::AppError;
use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::store::handlers as store;

/// Headroom for multipart framing on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_image_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/resume", get(store::handle_get_resume))
        .route(
            "/api/v1/resume/personal",
            patch(store::handle_update_personal_info),
        )
        .route(
            "/api/v1/resume/personal/image",
            post(store::handle_upload_image).delete(store::handle_remove_image),
        )
        .route(
            "/api/v1/resume/experiences",
            post(store::handle_add_experience),
        )
        .route(
            "/api/v1/resume/experiences/:id",
            patch(store::handle_update_experience).delete(store::handle_remove_experience),
        )
        .route(
            "/api/v1/resume/experiences/:id/achievements",
            post(store::handle_add_experience_achievement),
        )
        .route(
            "/api/v1/resume/experiences/:id/achievements/:index",
            put(store::handle_set_experience_achievement)
                .delete(store::handle_remove_experience_achievement),
        )
        .route(
            "/api/v1/resume/educations",
            post(store::handle_add_education),
        )
        .route(
            "/api/v1/resume/educations/:id",
            patch(store::handle_update_education).delete(store::handle_remove_education),
        )
        .route(
            "/api/v1/resume/educations/:id/achievements",
            post(store::handle_add_education_achievement),
        )
        .route(
            "/api/v1/resume/educations/:id/achievements/:index",
            put(store::handle_set_education_achievement)
                .delete(store::handle_remove_education_achievement),
        )
        .route(
            "/api/v1/resume/skill-groups",
            post(store::handle_add_skill_group),
        )
        .route(
            "/api/v1/resume/skill-groups/:id",
            patch(store::handle_update_skill_group).delete(store::handle_remove_skill_group),
        )
        .route(
            "/api/v1/resume/skill-groups/:id/skills",
            post(store::handle_add_skill),
        )
        .route(
            "/api/v1/resume/skill-groups/:id/skills/:skill_id",
            patch(store::handle_update_skill).delete(store::handle_remove_skill),
        )
        .route(
            "/api/v1/resume/template",
            put(store::handle_update_template),
        )
        .route("/api/v1/resume/reset", post(store::handle_reset))
        .route("/api/v1/resume/save", post(store::handle_save))
        // Templates and preview
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route(
            "/api/v1/resume/preview.svg",
            get(render::handle_preview_svg),
        )
        .route("/preview", get(render::handle_preview_page))
        // Export
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
