use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::template::TemplateId;

/// Generates a fresh opaque identifier for a newly created entry.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Inline `data:` URI of the profile picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    /// `YYYY-MM`
    pub start_date: String,
    /// Empty while `currently_working` is set.
    pub end_date: String,
    #[serde(default)]
    pub currently_working: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub currently_studying: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Proficiency 1 to 5. Skills without a level render without an indicator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroup {
    pub id: String,
    pub name: String,
    pub skills: Vec<Skill>,
}

/// The whole resume document: the unit of persistence and of rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub skill_groups: Vec<SkillGroup>,
    /// Stored verbatim. Unknown values resolve to the default template at render time.
    pub selected_template: String,
}

impl ResumeData {
    pub fn template(&self) -> TemplateId {
        TemplateId::resolve(&self.selected_template)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholder entries
// ────────────────────────────────────────────────────────────────────────────

pub const NEW_SKILL_NAME: &str = "New Skill";
pub const NEW_SKILL_LEVEL: u8 = 3;

impl Experience {
    pub fn placeholder() -> Self {
        Experience {
            id: new_entry_id(),
            company: "New Company".to_string(),
            position: "Position Title".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            currently_working: false,
            description: String::new(),
            achievements: vec![String::new()],
        }
    }
}

impl Education {
    pub fn placeholder() -> Self {
        Education {
            id: new_entry_id(),
            institution: "New Institution".to_string(),
            degree: "Degree".to_string(),
            field: "Field of Study".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            currently_studying: false,
            gpa: Some(String::new()),
            achievements: vec![String::new()],
        }
    }
}

impl Skill {
    pub fn placeholder() -> Self {
        Skill {
            id: new_entry_id(),
            name: NEW_SKILL_NAME.to_string(),
            level: Some(NEW_SKILL_LEVEL),
        }
    }
}

impl SkillGroup {
    pub fn placeholder() -> Self {
        SkillGroup {
            id: new_entry_id(),
            name: "New Skill Group".to_string(),
            skills: vec![Skill::placeholder()],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Partial updates
// ────────────────────────────────────────────────────────────────────────────

/// Fields to merge into `PersonalInfo`. Absent fields keep their value.
/// An empty string clears an optional field.
///
/// The profile image is not patchable; it only changes through the upload path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub currently_working: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub currently_studying: Option<bool>,
    pub gpa: Option<String>,
    pub achievements: Option<Vec<String>>,
}

/// Skill group fields that can be edited in place; skills have their own operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroupPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<u8>,
}

fn merge(target: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn merge_optional(target: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *target = if v.is_empty() { None } else { Some(v) };
    }
}

impl PersonalInfo {
    pub fn apply(&mut self, patch: PersonalInfoPatch) {
        merge(&mut self.full_name, patch.full_name);
        merge(&mut self.title, patch.title);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.location, patch.location);
        merge_optional(&mut self.website, patch.website);
        merge_optional(&mut self.linkedin, patch.linkedin);
        merge(&mut self.summary, patch.summary);
    }
}

impl Experience {
    pub fn apply(&mut self, patch: ExperiencePatch) {
        merge(&mut self.company, patch.company);
        merge(&mut self.position, patch.position);
        merge(&mut self.start_date, patch.start_date);
        merge(&mut self.end_date, patch.end_date);
        if let Some(current) = patch.currently_working {
            self.currently_working = current;
        }
        merge(&mut self.description, patch.description);
        if let Some(achievements) = patch.achievements {
            self.achievements = achievements;
        }
        self.normalize();
    }

    /// Re-establishes the entry invariants after an edit.
    pub fn normalize(&mut self) {
        if self.currently_working {
            self.end_date.clear();
        }
        if self.achievements.is_empty() {
            self.achievements.push(String::new());
        }
    }
}

impl Education {
    pub fn apply(&mut self, patch: EducationPatch) {
        merge(&mut self.institution, patch.institution);
        merge(&mut self.degree, patch.degree);
        merge(&mut self.field, patch.field);
        merge(&mut self.start_date, patch.start_date);
        merge(&mut self.end_date, patch.end_date);
        if let Some(current) = patch.currently_studying {
            self.currently_studying = current;
        }
        if let Some(gpa) = patch.gpa {
            self.gpa = Some(gpa);
        }
        if let Some(achievements) = patch.achievements {
            self.achievements = achievements;
        }
        self.normalize();
    }

    pub fn normalize(&mut self) {
        if self.currently_studying {
            self.end_date.clear();
        }
        if self.achievements.is_empty() {
            self.achievements.push(String::new());
        }
    }
}

impl SkillGroup {
    pub fn apply(&mut self, patch: SkillGroupPatch) {
        merge(&mut self.name, patch.name);
    }
}

impl Skill {
    pub fn apply(&mut self, patch: SkillPatch) {
        merge(&mut self.name, patch.name);
        if let Some(level) = patch.level {
            self.level = Some(level.clamp(1, 5));
        }
    }
}

/// Entries that carry an editable achievement list.
pub trait HasAchievements {
    fn achievements_mut(&mut self) -> &mut Vec<String>;
}

impl HasAchievements for Experience {
    fn achievements_mut(&mut self) -> &mut Vec<String> {
        &mut self.achievements
    }
}

impl HasAchievements for Education {
    fn achievements_mut(&mut self) -> &mut Vec<String> {
        &mut self.achievements
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
