//! Single owner of the resume document.
//!
//! Every mutation follows the same cycle under one lock:
//! 1. clone the current document and apply the change to the copy
//! 2. swap the copy in as the current document
//! 3. write it to storage before returning
//!
//! Readers get `Arc` snapshots and never observe a half-applied edit.
//! A failed write keeps the new in-memory value and marks the durable copy stale;
//! any later successful write (including `save`) clears the flag.

pub mod achievements;
pub mod handlers;
pub mod storage;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::models::{
    demo_document, Education, EducationPatch, Experience, ExperiencePatch, HasAchievements,
    PersonalInfoPatch, ResumeData, Skill, SkillGroup, SkillGroupPatch, SkillPatch,
};

pub use storage::{DocumentStorage, FileStorage, MemoryStorage, StoreError};

pub type StoreResult = Result<Arc<ResumeData>, StoreError>;

/// Which achievement-bearing list an achievement operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementOwner {
    Experience,
    Education,
}

pub struct DocumentStore {
    current: Mutex<Arc<ResumeData>>,
    storage: Box<dyn DocumentStorage>,
    stale: AtomicBool,
}

impl DocumentStore {
    /// Reads the persisted document, falling back to the demo document when it is
    /// missing or can't be parsed. Never fails.
    pub fn load(storage: impl DocumentStorage + 'static) -> Self {
        let document = match storage.read() {
            Ok(Some(raw)) => match serde_json::from_str::<ResumeData>(&raw) {
                Ok(doc) => {
                    info!(location = %storage.location(), "Loaded persisted resume document");
                    doc
                }
                Err(e) => {
                    warn!(
                        location = %storage.location(),
                        "Persisted resume document is unreadable, using demo document: {e}"
                    );
                    demo_document()
                }
            },
            Ok(None) => {
                info!(location = %storage.location(), "No persisted resume document, using demo document");
                demo_document()
            }
            Err(e) => {
                warn!("Failed to read persisted resume document, using demo document: {e}");
                demo_document()
            }
        };

        Self {
            current: Mutex::new(Arc::new(document)),
            storage: Box::new(storage),
            stale: AtomicBool::new(false),
        }
    }

    /// Consistent read-only view of the current document.
    pub fn snapshot(&self) -> Arc<ResumeData> {
        Arc::clone(&self.current.lock())
    }

    /// True when the last durable write failed and nothing has succeeded since.
    pub fn has_unsaved_changes(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Writes the current document again. Used to retry after a failed write.
    pub fn save(&self) -> StoreResult {
        let current = self.current.lock();
        self.persist(&current)?;
        Ok(Arc::clone(&current))
    }

    fn mutate(&self, change: impl FnOnce(&mut ResumeData)) -> StoreResult {
        let mut current = self.current.lock();
        let mut next = ResumeData::clone(&current);
        change(&mut next);
        let next = Arc::new(next);
        *current = Arc::clone(&next);
        self.persist(&next)?;
        Ok(next)
    }

    fn persist(&self, document: &ResumeData) -> Result<(), StoreError> {
        let result = serde_json::to_string(document)
            .map_err(StoreError::from)
            .and_then(|json| self.storage.write(&json));

        match result {
            Ok(()) => {
                if self.stale.swap(false, Ordering::AcqRel) {
                    info!("Resume document saved after earlier write failure");
                }
                debug!(location = %self.storage.location(), "Resume document persisted");
                Ok(())
            }
            Err(e) => {
                self.stale.store(true, Ordering::Release);
                error!("Resume document kept in memory but not persisted: {e}");
                Err(e)
            }
        }
    }

    // ── personal info ───────────────────────────────────────────────────────

    pub fn update_personal_info(&self, patch: PersonalInfoPatch) -> StoreResult {
        self.mutate(|doc| doc.personal_info.apply(patch))
    }

    /// `data_uri` must already be validated; see `upload::prepare_profile_image`.
    pub fn upload_profile_image(&self, data_uri: String) -> StoreResult {
        self.mutate(|doc| doc.personal_info.profile_image = Some(data_uri))
    }

    pub fn remove_profile_image(&self) -> StoreResult {
        self.mutate(|doc| doc.personal_info.profile_image = None)
    }

    // ── experiences ─────────────────────────────────────────────────────────

    /// Newest first: the placeholder goes to index 0.
    pub fn add_experience(&self) -> StoreResult {
        self.mutate(|doc| doc.experiences.insert(0, Experience::placeholder()))
    }

    pub fn update_experience(&self, id: &str, patch: ExperiencePatch) -> StoreResult {
        self.mutate(|doc| {
            if let Some(exp) = doc.experiences.iter_mut().find(|e| e.id == id) {
                exp.apply(patch);
            }
        })
    }

    pub fn remove_experience(&self, id: &str) -> StoreResult {
        self.mutate(|doc| doc.experiences.retain(|e| e.id != id))
    }

    // ── educations ──────────────────────────────────────────────────────────

    pub fn add_education(&self) -> StoreResult {
        self.mutate(|doc| doc.educations.insert(0, Education::placeholder()))
    }

    pub fn update_education(&self, id: &str, patch: EducationPatch) -> StoreResult {
        self.mutate(|doc| {
            if let Some(edu) = doc.educations.iter_mut().find(|e| e.id == id) {
                edu.apply(patch);
            }
        })
    }

    pub fn remove_education(&self, id: &str) -> StoreResult {
        self.mutate(|doc| doc.educations.retain(|e| e.id != id))
    }

    // ── achievements ────────────────────────────────────────────────────────

    pub fn add_achievement(&self, owner: AchievementOwner, id: &str) -> StoreResult {
        self.mutate(|doc| with_achievements(doc, owner, id, achievements::add))
    }

    pub fn set_achievement(
        &self,
        owner: AchievementOwner,
        id: &str,
        index: usize,
        text: String,
    ) -> StoreResult {
        self.mutate(|doc| {
            with_achievements(doc, owner, id, |list| achievements::set(list, index, text))
        })
    }

    pub fn remove_achievement(&self, owner: AchievementOwner, id: &str, index: usize) -> StoreResult {
        self.mutate(|doc| {
            with_achievements(doc, owner, id, |list| achievements::remove(list, index))
        })
    }

    // ── skill groups ────────────────────────────────────────────────────────

    /// Appended, so groups keep the order the user created them in.
    pub fn add_skill_group(&self) -> StoreResult {
        self.mutate(|doc| doc.skill_groups.push(SkillGroup::placeholder()))
    }

    pub fn update_skill_group(&self, id: &str, patch: SkillGroupPatch) -> StoreResult {
        self.mutate(|doc| {
            if let Some(group) = doc.skill_groups.iter_mut().find(|g| g.id == id) {
                group.apply(patch);
            }
        })
    }

    pub fn remove_skill_group(&self, id: &str) -> StoreResult {
        self.mutate(|doc| doc.skill_groups.retain(|g| g.id != id))
    }

    // ── skills ──────────────────────────────────────────────────────────────

    pub fn add_skill(&self, group_id: &str) -> StoreResult {
        self.mutate(|doc| {
            if let Some(group) = doc.skill_groups.iter_mut().find(|g| g.id == group_id) {
                group.skills.push(Skill::placeholder());
            }
        })
    }

    pub fn update_skill(&self, group_id: &str, skill_id: &str, patch: SkillPatch) -> StoreResult {
        self.mutate(|doc| {
            let skill = doc
                .skill_groups
                .iter_mut()
                .find(|g| g.id == group_id)
                .and_then(|g| g.skills.iter_mut().find(|s| s.id == skill_id));
            if let Some(skill) = skill {
                skill.apply(patch);
            }
        })
    }

    /// Removing a group's last skill is allowed here; the editor is what prevents it.
    pub fn remove_skill(&self, group_id: &str, skill_id: &str) -> StoreResult {
        self.mutate(|doc| {
            if let Some(group) = doc.skill_groups.iter_mut().find(|g| g.id == group_id) {
                group.skills.retain(|s| s.id != skill_id);
            }
        })
    }

    // ── document-wide ───────────────────────────────────────────────────────

    /// Not validated: unknown identifiers fall back to the default template when rendered.
    pub fn update_template(&self, template_id: String) -> StoreResult {
        self.mutate(|doc| doc.selected_template = template_id)
    }

    pub fn reset_to_demo(&self) -> StoreResult {
        self.mutate(|doc| *doc = demo_document())
    }
}

fn with_achievements(
    doc: &mut ResumeData,
    owner: AchievementOwner,
    id: &str,
    edit: impl FnOnce(&mut Vec<String>),
) {
    let entry: Option<&mut dyn HasAchievements> = match owner {
        AchievementOwner::Experience => doc
            .experiences
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| e as &mut dyn HasAchievements),
        AchievementOwner::Education => doc
            .educations
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| e as &mut dyn HasAchievements),
    };
    if let Some(entry) = entry {
        edit(entry.achievements_mut());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{NEW_SKILL_LEVEL, NEW_SKILL_NAME};
    use std::io;

    /// Storage whose writes always fail, for exercising the stale-copy policy.
    #[derive(Default)]
    struct FailingStorage {
        fail: AtomicBool,
        inner: MemoryStorage,
    }

    impl DocumentStorage for FailingStorage {
        fn read(&self) -> Result<Option<String>, StoreError> {
            self.inner.read()
        }

        fn write(&self, contents: &str) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Write {
                    location: "failing".to_string(),
                    source: io::Error::other("quota exceeded"),
                });
            }
            self.inner.write(contents)
        }

        fn location(&self) -> String {
            "failing".to_string()
        }
    }

    fn demo_store() -> DocumentStore {
        DocumentStore::load(MemoryStorage::default())
    }

    fn shared_store() -> (DocumentStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        (DocumentStore::load(Arc::clone(&storage)), storage)
    }

    fn persisted(storage: &MemoryStorage) -> ResumeData {
        serde_json::from_str(&storage.contents().expect("document persisted")).unwrap()
    }

    // ── load ────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_empty_storage_uses_demo() {
        let store = demo_store();
        assert_eq!(*store.snapshot(), demo_document());
    }

    #[test]
    fn test_load_corrupt_storage_uses_demo() {
        let store = DocumentStore::load(MemoryStorage::with_contents("{not json"));
        assert_eq!(*store.snapshot(), demo_document());
    }

    #[test]
    fn test_load_wrong_shape_uses_demo() {
        let store = DocumentStore::load(MemoryStorage::with_contents(r#"{"personalInfo": 3}"#));
        assert_eq!(*store.snapshot(), demo_document());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let (store, storage) = shared_store();
        store.add_experience().unwrap();
        store.add_skill_group().unwrap();
        store
            .update_personal_info(PersonalInfoPatch {
                full_name: Some("Ada Lovelace".to_string()),
                ..Default::default()
            })
            .unwrap();
        store
            .upload_profile_image("data:image/png;base64,AAAA".to_string())
            .unwrap();
        let written = store.snapshot();

        let reloaded = DocumentStore::load(MemoryStorage::with_contents(
            storage.contents().unwrap(),
        ));
        assert_eq!(*reloaded.snapshot(), *written);
    }

    #[test]
    fn test_round_trip_through_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::load(FileStorage::in_dir(dir.path()));
        store.update_template("modern".to_string()).unwrap();
        store.add_education().unwrap();
        let written = store.snapshot();

        let reloaded = DocumentStore::load(FileStorage::in_dir(dir.path()));
        assert_eq!(*reloaded.snapshot(), *written);
    }

    // ── persistence on every mutation ───────────────────────────────────────

    #[test]
    fn test_every_mutation_persists() {
        let (store, storage) = shared_store();
        assert!(storage.contents().is_none(), "load alone must not write");

        store.update_template("elegant".to_string()).unwrap();
        assert_eq!(persisted(&storage).selected_template, "elegant");

        store.add_experience().unwrap();
        assert_eq!(persisted(&storage), *store.snapshot());
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_mutation() {
        let store = demo_store();
        let before = store.snapshot();
        store.remove_experience("1").unwrap();
        assert_eq!(before.experiences.len(), 2);
        assert_eq!(store.snapshot().experiences.len(), 1);
    }

    // ── experiences ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_experience_prepends_one_entry() {
        let store = demo_store();
        let before = store.snapshot();
        let after = store.add_experience().unwrap();
        assert_eq!(after.experiences.len(), before.experiences.len() + 1);
        assert_eq!(after.experiences[0].company, "New Company");
        assert_eq!(after.experiences[0].achievements, vec![String::new()]);
        assert_eq!(after.experiences[1], before.experiences[0]);
    }

    #[test]
    fn test_remove_experience_existing_and_missing() {
        let store = demo_store();
        let after = store.remove_experience("1").unwrap();
        assert_eq!(after.experiences.len(), 1);
        let after = store.remove_experience("does-not-exist").unwrap();
        assert_eq!(after.experiences.len(), 1);
    }

    #[test]
    fn test_update_experience_currently_working_clears_end_date() {
        let store = demo_store();
        // Demo entry "2" has an end date.
        let after = store
            .update_experience(
                "2",
                ExperiencePatch {
                    currently_working: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        let exp = after.experiences.iter().find(|e| e.id == "2").unwrap();
        assert!(exp.currently_working);
        assert_eq!(exp.end_date, "");
    }

    #[test]
    fn test_update_unknown_experience_is_noop() {
        let store = demo_store();
        let before = store.snapshot();
        let after = store
            .update_experience(
                "missing",
                ExperiencePatch {
                    company: Some("Nope".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(*after, *before);
    }

    // ── educations ──────────────────────────────────────────────────────────

    #[test]
    fn test_add_education_prepends_placeholder() {
        let store = demo_store();
        let after = store.add_education().unwrap();
        assert_eq!(after.educations.len(), 2);
        assert_eq!(after.educations[0].institution, "New Institution");
        assert_eq!(after.educations[1].id, "1");
    }

    #[test]
    fn test_update_and_remove_education() {
        let store = demo_store();
        let after = store
            .update_education(
                "1",
                EducationPatch {
                    gpa: Some("4.0".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(after.educations[0].gpa.as_deref(), Some("4.0"));
        let after = store.remove_education("1").unwrap();
        assert!(after.educations.is_empty());
    }

    // ── achievements ────────────────────────────────────────────────────────

    #[test]
    fn test_remove_all_achievements_leaves_placeholder() {
        let store = demo_store();
        for _ in 0..4 {
            store
                .remove_achievement(AchievementOwner::Experience, "1", 0)
                .unwrap();
        }
        let doc = store.snapshot();
        assert_eq!(doc.experiences[0].achievements, vec![String::new()]);
    }

    #[test]
    fn test_education_achievement_edit_prunes_trailing_empties() {
        let store = demo_store();
        store
            .add_achievement(AchievementOwner::Education, "1")
            .unwrap();
        assert_eq!(store.snapshot().educations[0].achievements.len(), 4);
        store
            .set_achievement(AchievementOwner::Education, "1", 2, String::new())
            .unwrap();
        let doc = store.snapshot();
        assert_eq!(
            doc.educations[0].achievements,
            vec![
                "Graduated with honors".to_string(),
                "President of Computer Science Society".to_string(),
            ]
        );
    }

    #[test]
    fn test_achievement_on_unknown_entry_is_noop() {
        let store = demo_store();
        let before = store.snapshot();
        let after = store
            .remove_achievement(AchievementOwner::Education, "missing", 0)
            .unwrap();
        assert_eq!(*after, *before);
    }

    // ── skills ──────────────────────────────────────────────────────────────

    #[test]
    fn test_skill_group_scenario_from_demo() {
        let store = demo_store();
        let pre_existing = store.snapshot().skill_groups.len();

        let doc = store.add_skill_group().unwrap();
        let group_id = doc.skill_groups.last().unwrap().id.clone();

        store.add_skill(&group_id).unwrap();
        let doc = store.add_skill(&group_id).unwrap();
        let second_id = doc.skill_groups.last().unwrap().skills[2].id.clone();

        let doc = store.remove_skill(&group_id, &second_id).unwrap();
        assert_eq!(doc.skill_groups.len(), pre_existing + 1);

        let group = &doc.skill_groups[pre_existing];
        assert_eq!(group.id, group_id);
        assert_eq!(group.skills.len(), 2);
        for skill in &group.skills {
            assert_eq!(skill.name, NEW_SKILL_NAME);
            assert_eq!(skill.level, Some(NEW_SKILL_LEVEL));
        }
    }

    #[test]
    fn test_skill_operations_on_unknown_ids_are_noops() {
        let store = demo_store();
        let before = store.snapshot();
        store.add_skill("missing").unwrap();
        store.remove_skill("1", "missing").unwrap();
        store
            .update_skill(
                "missing",
                "1",
                SkillPatch {
                    name: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn test_update_skill_and_group() {
        let store = demo_store();
        store
            .update_skill(
                "1",
                "4",
                SkillPatch {
                    level: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();
        let doc = store
            .update_skill_group(
                "2",
                SkillGroupPatch {
                    name: Some("Frameworks".to_string()),
                },
            )
            .unwrap();
        assert_eq!(doc.skill_groups[0].skills[3].level, Some(5));
        assert_eq!(doc.skill_groups[1].name, "Frameworks");
        let doc = store.remove_skill_group("1").unwrap();
        assert_eq!(doc.skill_groups.len(), 1);
    }

    // ── template + reset ────────────────────────────────────────────────────

    #[test]
    fn test_update_template_accepts_unknown_id() {
        let store = demo_store();
        let doc = store.update_template("not-a-real-template".to_string()).unwrap();
        assert_eq!(doc.selected_template, "not-a-real-template");
    }

    #[test]
    fn test_reset_to_demo_restores_and_persists() {
        let (store, storage) = shared_store();
        store.remove_experience("1").unwrap();
        store.remove_skill_group("2").unwrap();
        let doc = store.reset_to_demo().unwrap();
        assert_eq!(*doc, demo_document());
        assert_eq!(persisted(&storage), demo_document());
    }

    #[test]
    fn test_upload_profile_image_sets_field() {
        let store = demo_store();
        let doc = store
            .upload_profile_image("data:image/png;base64,AAAA".to_string())
            .unwrap();
        assert_eq!(
            doc.personal_info.profile_image.as_deref(),
            Some("data:image/png;base64,AAAA")
        );

        let doc = store.remove_profile_image().unwrap();
        assert_eq!(doc.personal_info.profile_image, None);
    }

    // ── write failure policy ────────────────────────────────────────────────

    #[test]
    fn test_failed_write_keeps_memory_and_marks_stale() {
        let storage = Arc::new(FailingStorage::default());
        let store = DocumentStore::load(Arc::clone(&storage));
        storage.fail.store(true, Ordering::SeqCst);

        let result = store.update_template("modern".to_string());
        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert_eq!(store.snapshot().selected_template, "modern");
        assert!(store.has_unsaved_changes());
        assert!(storage.inner.contents().is_none());

        storage.fail.store(false, Ordering::SeqCst);
        store.save().unwrap();
        assert!(!store.has_unsaved_changes());
        let saved: ResumeData =
            serde_json::from_str(&storage.inner.contents().unwrap()).unwrap();
        assert_eq!(saved.selected_template, "modern");
    }
}
