// src/types/mod.rs
//! Resume document model and its completion predicates

pub mod completeness;
pub mod resume;

pub use completeness::{
    completion_report, overall_complete, section_complete, CompletionReport, Section,
};
pub use resume::{
    parse_achievements_input, parse_skills_input, CustomSection, EducationEntry, ExperienceEntry,
    PersonalInfo, ResumeDocument,
};
