//! Built-in demo document, used on first start and by "reset to demo".

use crate::models::resume::{Education, Experience, PersonalInfo, ResumeData, Skill, SkillGroup};
use crate::models::template::TemplateId;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn skill(id: &str, name: &str, level: u8) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        level: Some(level),
    }
}

pub fn demo_document() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Alex Johnson".to_string(),
            title: "Senior Software Developer".to_string(),
            email: "alex.johnson@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            website: Some("alexjohnson.dev".to_string()),
            linkedin: Some("linkedin.com/in/alexjohnson".to_string()),
            profile_image: None,
            summary: "Dedicated software developer with 7+ years of experience building web and \
                      mobile applications. Passionate about creating clean, efficient code and \
                      collaborating with cross-functional teams to deliver high-quality products."
                .to_string(),
        },
        experiences: vec![
            Experience {
                id: "1".to_string(),
                company: "Tech Solutions Inc.".to_string(),
                position: "Senior Software Developer".to_string(),
                start_date: "2020-01".to_string(),
                end_date: String::new(),
                currently_working: true,
                description:
                    "Lead developer for multiple client projects focusing on web applications."
                        .to_string(),
                achievements: strings(&[
                    "Architected and implemented a cloud-based solution that reduced infrastructure costs by 40%",
                    "Led a team of 5 developers to deliver a major product update ahead of schedule",
                    "Introduced automated testing procedures that caught 95% of regression bugs",
                ]),
            },
            Experience {
                id: "2".to_string(),
                company: "Digital Innovations".to_string(),
                position: "Software Developer".to_string(),
                start_date: "2017-03".to_string(),
                end_date: "2019-12".to_string(),
                currently_working: false,
                description: "Developed and maintained multiple web applications for clients \
                              across industries."
                    .to_string(),
                achievements: strings(&[
                    "Optimized database queries resulting in 60% faster load times",
                    "Created a component library that increased development speed by 35%",
                    "Mentored 3 junior developers who were promoted within a year",
                ]),
            },
        ],
        educations: vec![Education {
            id: "1".to_string(),
            institution: "University of Technology".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2013-09".to_string(),
            end_date: "2017-05".to_string(),
            currently_studying: false,
            gpa: Some("3.8".to_string()),
            achievements: strings(&[
                "Graduated with honors",
                "President of Computer Science Society",
                "Published research on machine learning algorithms",
            ]),
        }],
        skill_groups: vec![
            SkillGroup {
                id: "1".to_string(),
                name: "Programming Languages".to_string(),
                skills: vec![
                    skill("1", "JavaScript", 5),
                    skill("2", "TypeScript", 4),
                    skill("3", "Python", 4),
                    skill("4", "Java", 3),
                ],
            },
            SkillGroup {
                id: "2".to_string(),
                name: "Frameworks & Libraries".to_string(),
                skills: vec![
                    skill("5", "React", 5),
                    skill("6", "Node.js", 4),
                    skill("7", "Express", 4),
                    skill("8", "Django", 3),
                ],
            },
        ],
        selected_template: TemplateId::DEFAULT.as_str().to_string(),
    }
}
