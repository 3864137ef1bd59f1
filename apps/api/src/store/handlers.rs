use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{
    EducationPatch, ExperiencePatch, PersonalInfoPatch, ResumeData, SkillGroupPatch, SkillPatch,
};
use crate::state::AppState;
use crate::store::AchievementOwner;
use crate::upload::prepare_profile_image;

/// Every editing endpoint answers with the document as it stands after the change.
type DocumentResponse = Result<Json<Arc<ResumeData>>, AppError>;

#[derive(Deserialize)]
pub struct AchievementText {
    pub text: String,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelection {
    pub template_id: String,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<Arc<ResumeData>> {
    Json(state.store.snapshot())
}

/// PATCH /api/v1/resume/personal
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    Json(patch): Json<PersonalInfoPatch>,
) -> DocumentResponse {
    Ok(Json(state.store.update_personal_info(patch)?))
}

/// POST /api/v1/resume/personal/image
///
/// Multipart form with an `image` field. Validation happens before the store is touched.
pub async fn handle_upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> DocumentResponse {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;

        let data_uri =
            prepare_profile_image(&data, content_type.as_deref(), state.config.max_image_bytes)?;
        return Ok(Json(state.store.upload_profile_image(data_uri)?));
    }

    Err(AppError::Validation(
        "Upload must include an 'image' field".to_string(),
    ))
}

/// DELETE /api/v1/resume/personal/image
pub async fn handle_remove_image(State(state): State<AppState>) -> DocumentResponse {
    Ok(Json(state.store.remove_profile_image()?))
}

// ── experiences ─────────────────────────────────────────────────────────────

/// POST /api/v1/resume/experiences
pub async fn handle_add_experience(State(state): State<AppState>) -> DocumentResponse {
    Ok(Json(state.store.add_experience()?))
}

/// PATCH /api/v1/resume/experiences/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ExperiencePatch>,
) -> DocumentResponse {
    Ok(Json(state.store.update_experience(&id, patch)?))
}

/// DELETE /api/v1/resume/experiences/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DocumentResponse {
    Ok(Json(state.store.remove_experience(&id)?))
}

// ── educations ──────────────────────────────────────────────────────────────

/// POST /api/v1/resume/educations
pub async fn handle_add_education(State(state): State<AppState>) -> DocumentResponse {
    Ok(Json(state.store.add_education()?))
}

/// PATCH /api/v1/resume/educations/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EducationPatch>,
) -> DocumentResponse {
    Ok(Json(state.store.update_education(&id, patch)?))
}

/// DELETE /api/v1/resume/educations/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DocumentResponse {
    Ok(Json(state.store.remove_education(&id)?))
}

// ── achievements ────────────────────────────────────────────────────────────

/// POST /api/v1/resume/experiences/:id/achievements
pub async fn handle_add_experience_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DocumentResponse {
    Ok(Json(
        state.store.add_achievement(AchievementOwner::Experience, &id)?,
    ))
}

/// PUT /api/v1/resume/experiences/:id/achievements/:index
pub async fn handle_set_experience_achievement(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Json(body): Json<AchievementText>,
) -> DocumentResponse {
    Ok(Json(state.store.set_achievement(
        AchievementOwner::Experience,
        &id,
        index,
        body.text,
    )?))
}

/// DELETE /api/v1/resume/experiences/:id/achievements/:index
pub async fn handle_remove_experience_achievement(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> DocumentResponse {
    Ok(Json(state.store.remove_achievement(
        AchievementOwner::Experience,
        &id,
        index,
    )?))
}

/// POST /api/v1/resume/educations/:id/achievements
pub async fn handle_add_education_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DocumentResponse {
    Ok(Json(
        state.store.add_achievement(AchievementOwner::Education, &id)?,
    ))
}

/// PUT /api/v1/resume/educations/:id/achievements/:index
pub async fn handle_set_education_achievement(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Json(body): Json<AchievementText>,
) -> DocumentResponse {
    Ok(Json(state.store.set_achievement(
        AchievementOwner::Education,
        &id,
        index,
        body.text,
    )?))
}

/// DELETE /api/v1/resume/educations/:id/achievements/:index
pub async fn handle_remove_education_achievement(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> DocumentResponse {
    Ok(Json(state.store.remove_achievement(
        AchievementOwner::Education,
        &id,
        index,
    )?))
}

// ── skills ──────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/skill-groups
pub async fn handle_add_skill_group(State(state): State<AppState>) -> DocumentResponse {
    Ok(Json(state.store.add_skill_group()?))
}

/// PATCH /api/v1/resume/skill-groups/:id
pub async fn handle_update_skill_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SkillGroupPatch>,
) -> DocumentResponse {
    Ok(Json(state.store.update_skill_group(&id, patch)?))
}

/// DELETE /api/v1/resume/skill-groups/:id
pub async fn handle_remove_skill_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DocumentResponse {
    Ok(Json(state.store.remove_skill_group(&id)?))
}

/// POST /api/v1/resume/skill-groups/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> DocumentResponse {
    Ok(Json(state.store.add_skill(&group_id)?))
}

/// PATCH /api/v1/resume/skill-groups/:id/skills/:skill_id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path((group_id, skill_id)): Path<(String, String)>,
    Json(patch): Json<SkillPatch>,
) -> DocumentResponse {
    Ok(Json(state.store.update_skill(&group_id, &skill_id, patch)?))
}

/// DELETE /api/v1/resume/skill-groups/:id/skills/:skill_id
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((group_id, skill_id)): Path<(String, String)>,
) -> DocumentResponse {
    Ok(Json(state.store.remove_skill(&group_id, &skill_id)?))
}

// ── document-wide ───────────────────────────────────────────────────────────

/// PUT /api/v1/resume/template
pub async fn handle_update_template(
    State(state): State<AppState>,
    Json(body): Json<TemplateSelection>,
) -> DocumentResponse {
    Ok(Json(state.store.update_template(body.template_id)?))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset(State(state): State<AppState>) -> DocumentResponse {
    Ok(Json(state.store.reset_to_demo()?))
}

/// POST /api/v1/resume/save
pub async fn handle_save(State(state): State<AppState>) -> DocumentResponse {
    Ok(Json(state.store.save()?))
}
