//! The closed set of resume templates.
//!
//! The editor's picker and the renderer's dispatch both iterate `TemplateId::ALL`,
//! so a template can't be offered without a layout or vice versa.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateId {
    Professional,
    Modern,
    Creative,
    Elegant,
    Minimalist,
    Technical,
    Executive,
    Academic,
    Simple,
    CreativeFull,
    CompactDark,
}

impl TemplateId {
    pub const ALL: [TemplateId; 11] = [
        TemplateId::Professional,
        TemplateId::Modern,
        TemplateId::Creative,
        TemplateId::Elegant,
        TemplateId::Minimalist,
        TemplateId::Technical,
        TemplateId::Executive,
        TemplateId::Academic,
        TemplateId::Simple,
        TemplateId::CreativeFull,
        TemplateId::CompactDark,
    ];

    /// Used whenever the stored identifier is missing or unknown.
    pub const DEFAULT: TemplateId = TemplateId::Professional;

    /// Identifier as stored in `selectedTemplate`.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Professional => "professional",
            TemplateId::Modern => "modern",
            TemplateId::Creative => "creative",
            TemplateId::Elegant => "elegant",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Technical => "technical",
            TemplateId::Executive => "executive",
            TemplateId::Academic => "academic",
            TemplateId::Simple => "simple",
            TemplateId::CreativeFull => "creativeFull",
            TemplateId::CompactDark => "compactDark",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Professional => "Professional",
            TemplateId::Modern => "Modern",
            TemplateId::Creative => "Creative",
            TemplateId::Elegant => "Elegant",
            TemplateId::Minimalist => "Minimalist",
            TemplateId::Technical => "Technical",
            TemplateId::Executive => "Executive",
            TemplateId::Academic => "Academic",
            TemplateId::Simple => "Simple",
            TemplateId::CreativeFull => "Creative Full",
            TemplateId::CompactDark => "Compact Dark",
        }
    }

    pub fn parse(id: &str) -> Option<TemplateId> {
        Self::ALL.into_iter().find(|t| t.as_str() == id)
    }

    /// Total mapping from any stored string to a template.
    pub fn resolve(id: &str) -> TemplateId {
        Self::parse(id).unwrap_or(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_id() {
        for template in TemplateId::ALL {
            assert_eq!(TemplateId::parse(template.as_str()), Some(template));
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for template in TemplateId::ALL {
            let json = serde_json::to_value(template).unwrap();
            assert_eq!(json, template.as_str());
        }
    }

    #[test]
    fn test_resolve_falls_back_to_professional() {
        assert_eq!(TemplateId::resolve(""), TemplateId::Professional);
        assert_eq!(TemplateId::resolve("Modern"), TemplateId::Professional);
        assert_eq!(TemplateId::resolve("compactDark"), TemplateId::CompactDark);
    }
}
