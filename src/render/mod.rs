// src/render/mod.rs
//! View projection: two pure renderers derived from the same document

pub mod export;
pub mod preview;

pub use export::to_typst;
pub use preview::render_preview;

use crate::types::resume::ResumeDocument;

/// Fallback shown for an empty end date. Empty start dates render empty,
/// never "Present"; both renderers follow the same policy.
pub const PRESENT: &str = "Present";

/// Which optional sections render. Computed once and consumed by both
/// renderers so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub achievements: bool,
}

pub fn section_visibility(doc: &ResumeDocument) -> SectionVisibility {
    SectionVisibility {
        summary: !doc.summary.is_empty(),
        experience: doc
            .experience
            .first()
            .map(|e| !e.company.is_empty())
            .unwrap_or(false),
        education: doc
            .education
            .first()
            .map(|e| !e.institution.is_empty())
            .unwrap_or(false),
        skills: !doc.skills.is_empty(),
        achievements: !doc.achievements.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_shows_nothing_optional() {
        let vis = section_visibility(&ResumeDocument::default());
        assert!(!vis.summary);
        assert!(!vis.experience);
        assert!(!vis.education);
        assert!(!vis.skills);
        assert!(!vis.achievements);
    }

    #[test]
    fn test_experience_needs_first_entry_company() {
        let mut doc = ResumeDocument::default();
        doc.add_experience();
        doc.experience[1].company = "Acme".into();
        // a later filled entry does not unhide the section
        assert!(!section_visibility(&doc).experience);

        doc.experience[0].company = "Initech".into();
        assert!(section_visibility(&doc).experience);
    }

    #[test]
    fn test_renderers_agree_on_visibility() {
        let mut doc = ResumeDocument::default();
        doc.summary = "A summary.".into();
        doc.education[0].institution = "State University".into();
        doc.skills = vec!["Rust".into()];

        let text = render_preview(&doc);
        let typst = to_typst(&doc);
        for (label, heading) in [
            ("Professional Summary", true),
            ("Work Experience", false),
            ("Education", true),
            ("Skills", true),
            ("Achievements & Awards", false),
        ] {
            assert_eq!(text.contains(label), heading, "preview: {label}");
            assert_eq!(typst.contains(&format!("= {label}")), heading, "export: {label}");
        }
    }
}
