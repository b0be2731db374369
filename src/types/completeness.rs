// src/types/completeness.rs
//! Per-section completion predicates and the stricter overall gate

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::resume::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::PersonalInfo,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Achievements,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Section::PersonalInfo => "Personal Info",
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Achievements => "Achievements",
        };
        write!(f, "{}", label)
    }
}

/// Loose per-section check, used to mark sections done in the UI.
pub fn section_complete(doc: &ResumeDocument, section: Section) -> bool {
    match section {
        Section::PersonalInfo => {
            !doc.personal_info.name.is_empty()
                && !doc.personal_info.email.is_empty()
                && !doc.personal_info.phone.is_empty()
        }
        Section::Summary => !doc.summary.trim().is_empty(),
        Section::Experience => doc
            .experience
            .first()
            .map(|e| !e.company.is_empty() && !e.position.is_empty())
            .unwrap_or(false),
        Section::Education => doc
            .education
            .first()
            .map(|e| !e.institution.is_empty() && !e.degree.is_empty())
            .unwrap_or(false),
        Section::Skills => doc.skills.first().map(|s| !s.is_empty()).unwrap_or(false),
        Section::Achievements => doc
            .achievements
            .first()
            .map(|a| !a.is_empty())
            .unwrap_or(false),
    }
}

/// Strict whole-document check gating cover-letter generation. Demands
/// more of the first experience/education entries than the per-section
/// checks do.
pub fn overall_complete(doc: &ResumeDocument) -> bool {
    let first_experience_filled = doc
        .experience
        .first()
        .map(|e| !e.company.is_empty() && !e.position.is_empty() && !e.description.is_empty())
        .unwrap_or(false);
    let first_education_filled = doc
        .education
        .first()
        .map(|e| !e.institution.is_empty() && !e.degree.is_empty() && !e.field.is_empty())
        .unwrap_or(false);

    section_complete(doc, Section::PersonalInfo)
        && !doc.job_title.is_empty()
        && !doc.summary.is_empty()
        && first_experience_filled
        && first_education_filled
        && !doc.skills.is_empty()
        && !doc.achievements.is_empty()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCompletion {
    pub section: Section,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReport {
    pub sections: Vec<SectionCompletion>,
    pub complete: bool,
}

pub fn completion_report(doc: &ResumeDocument) -> CompletionReport {
    CompletionReport {
        sections: Section::ALL
            .iter()
            .map(|&section| SectionCompletion {
                section,
                complete: section_complete(doc, section),
            })
            .collect(),
        complete: overall_complete(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Jane Doe".into();
        doc.personal_info.email = "jane@example.com".into();
        doc.personal_info.phone = "555-0100".into();
        doc.job_title = "Frontend Developer".into();
        doc.summary = "Builds fast accessible interfaces.".into();
        let exp = &mut doc.experience[0];
        exp.company = "Acme Corp".into();
        exp.position = "Engineer".into();
        exp.description = "Shipped the checkout rewrite.".into();
        let edu = &mut doc.education[0];
        edu.institution = "State University".into();
        edu.degree = "BSc".into();
        edu.field = "Computer Science".into();
        doc.skills = vec!["Rust".into()];
        doc.achievements = vec!["Employee of the month".into()];
        doc
    }

    #[test]
    fn test_default_document_is_incomplete() {
        let doc = ResumeDocument::default();
        for section in Section::ALL {
            assert!(!section_complete(&doc, section), "{section} should be incomplete");
        }
        assert!(!overall_complete(&doc));
    }

    #[test]
    fn test_filled_document_is_complete() {
        let doc = filled_document();
        for section in Section::ALL {
            assert!(section_complete(&doc, section), "{section} should be complete");
        }
        assert!(overall_complete(&doc));
    }

    #[test]
    fn test_personal_info_needs_name_email_and_phone() {
        let mut doc = filled_document();
        doc.personal_info.phone.clear();
        assert!(!section_complete(&doc, Section::PersonalInfo));
        assert!(!overall_complete(&doc));
    }

    #[test]
    fn test_summary_whitespace_is_incomplete() {
        let mut doc = filled_document();
        doc.summary = "   ".into();
        assert!(!section_complete(&doc, Section::Summary));
    }

    #[test]
    fn test_section_check_looser_than_overall() {
        // Experience passes the section check without a description, but
        // the overall gate still fails.
        let mut doc = filled_document();
        doc.experience[0].description.clear();
        assert!(section_complete(&doc, Section::Experience));
        assert!(!overall_complete(&doc));

        let mut doc = filled_document();
        doc.education[0].field.clear();
        assert!(section_complete(&doc, Section::Education));
        assert!(!overall_complete(&doc));
    }

    #[test]
    fn test_overall_requires_job_title() {
        let mut doc = filled_document();
        doc.job_title.clear();
        assert!(!overall_complete(&doc));
    }

    #[test]
    fn test_skills_with_empty_first_element() {
        let mut doc = filled_document();
        doc.skills = vec!["".into(), "Rust".into()];
        assert!(!section_complete(&doc, Section::Skills));
        // overall only needs a non-empty sequence
        assert!(overall_complete(&doc));
    }

    #[test]
    fn test_completion_progression() {
        // Fill the document field group by field group and watch the
        // overall gate flip only at the very end.
        let mut doc = ResumeDocument::default();
        assert!(!overall_complete(&doc));

        doc.personal_info.name = "Jane".into();
        doc.personal_info.email = "jane@example.com".into();
        doc.personal_info.phone = "555-0100".into();
        doc.job_title = "Developer".into();
        doc.summary = "Summary.".into();
        assert!(!overall_complete(&doc));

        doc.experience[0].company = "Acme".into();
        doc.experience[0].position = "Engineer".into();
        doc.experience[0].description = "Built things.".into();
        doc.education[0].institution = "State".into();
        doc.education[0].degree = "BSc".into();
        doc.education[0].field = "CS".into();
        assert!(!overall_complete(&doc));

        doc.skills = vec!["Rust".into()];
        assert!(!overall_complete(&doc));
        doc.achievements = vec!["Award".into()];
        assert!(overall_complete(&doc));
    }

    #[test]
    fn test_report_lists_every_section() {
        let report = completion_report(&filled_document());
        assert_eq!(report.sections.len(), Section::ALL.len());
        assert!(report.complete);
        assert!(report.sections.iter().all(|s| s.complete));
    }
}
