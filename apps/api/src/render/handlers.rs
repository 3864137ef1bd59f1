use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::TemplateId;
use crate::render::{html::preview_page, render, render_with, to_svg, Page};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
}

/// Optional `?template=` override so the picker can preview without selecting.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

fn render_current(state: &AppState, query: &PreviewQuery) -> (Page, String) {
    let doc = state.store.snapshot();
    let page = match query.template.as_deref() {
        Some(id) => render_with(&doc, TemplateId::resolve(id)),
        None => render(&doc),
    };
    (page, doc.personal_info.full_name.clone())
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        TemplateId::ALL
            .into_iter()
            .map(|t| TemplateSummary {
                id: t.as_str(),
                name: t.display_name(),
            })
            .collect(),
    )
}

/// GET /api/v1/resume/preview.svg
pub async fn handle_preview_svg(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> impl IntoResponse {
    let (page, _) = render_current(&state, &query);
    ([(header::CONTENT_TYPE, "image/svg+xml")], to_svg(&page))
}

/// GET /preview
pub async fn handle_preview_page(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Html<String> {
    let (page, full_name) = render_current(&state, &query);
    Html(preview_page(&page, &full_name))
}
