pub mod demo;
pub mod resume;
pub mod template;

pub use demo::demo_document;
pub use resume::{
    Education, EducationPatch, Experience, ExperiencePatch, HasAchievements,
    PersonalInfoPatch, ResumeData, Skill, SkillGroup, SkillGroupPatch, SkillPatch,
};
pub use template::TemplateId;
