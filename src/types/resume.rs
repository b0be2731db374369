// src/types/resume.rs
//! Resume document model: the single root aggregate all views derive from

use serde::{Deserialize, Serialize};

// ===== Document Structure =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub job_title: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub custom_sections: Vec<CustomSection>,
    // Context captured for AI prompts, never shown in the primary form
    pub industry: String,
    pub dream_job: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String, // empty means current position
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: i64,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            job_title: String::new(),
            summary: String::new(),
            experience: vec![ExperienceEntry::blank(1)],
            education: vec![EducationEntry::blank(1)],
            skills: Vec::new(),
            achievements: Vec::new(),
            custom_sections: Vec::new(),
            industry: String::new(),
            dream_job: String::new(),
        }
    }
}

impl ExperienceEntry {
    pub fn blank(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl EducationEntry {
    pub fn blank(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl CustomSection {
    pub fn blank(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

// Next id for a sequence: one past the largest id already present,
// so reloaded documents with time-based ids keep allocating above them.
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

// ===== Section Operations =====

impl ResumeDocument {
    /// Replace one named section wholesale. No deep merge, no semantic
    /// validation beyond structural shape.
    pub fn set_personal_info(&mut self, info: PersonalInfo) {
        self.personal_info = info;
    }

    pub fn set_job_title(&mut self, job_title: String) {
        self.job_title = job_title;
    }

    pub fn set_summary(&mut self, summary: String) {
        self.summary = summary;
    }

    pub fn set_experience(&mut self, entries: Vec<ExperienceEntry>) {
        self.experience = entries;
    }

    pub fn set_education(&mut self, entries: Vec<EducationEntry>) {
        self.education = entries;
    }

    pub fn set_skills(&mut self, skills: Vec<String>) {
        self.skills = skills;
    }

    pub fn set_achievements(&mut self, achievements: Vec<String>) {
        self.achievements = achievements;
    }

    pub fn set_custom_sections(&mut self, sections: Vec<CustomSection>) {
        self.custom_sections = sections;
    }

    pub fn set_context(&mut self, industry: String, dream_job: String) {
        self.industry = industry;
        self.dream_job = dream_job;
    }

    pub fn has_context(&self) -> bool {
        !self.industry.is_empty() || !self.dream_job.is_empty()
    }

    // ===== Entry Lifecycle =====

    /// Append a blank experience entry, returning its id.
    pub fn add_experience(&mut self) -> i64 {
        let id = next_id(self.experience.iter().map(|e| e.id));
        self.experience.push(ExperienceEntry::blank(id));
        id
    }

    /// Remove an experience entry by id. Refused when only one entry
    /// remains or the id is unknown.
    pub fn remove_experience(&mut self, id: i64) -> bool {
        if self.experience.len() <= 1 {
            return false;
        }
        let before = self.experience.len();
        self.experience.retain(|e| e.id != id);
        self.experience.len() < before
    }

    pub fn experience_mut(&mut self, id: i64) -> Option<&mut ExperienceEntry> {
        self.experience.iter_mut().find(|e| e.id == id)
    }

    pub fn add_education(&mut self) -> i64 {
        let id = next_id(self.education.iter().map(|e| e.id));
        self.education.push(EducationEntry::blank(id));
        id
    }

    pub fn remove_education(&mut self, id: i64) -> bool {
        if self.education.len() <= 1 {
            return false;
        }
        let before = self.education.len();
        self.education.retain(|e| e.id != id);
        self.education.len() < before
    }

    pub fn education_mut(&mut self, id: i64) -> Option<&mut EducationEntry> {
        self.education.iter_mut().find(|e| e.id == id)
    }

    /// Custom sections start empty and may shrink back to empty.
    pub fn add_custom_section(&mut self) -> i64 {
        let id = next_id(self.custom_sections.iter().map(|s| s.id));
        self.custom_sections.push(CustomSection::blank(id));
        id
    }

    pub fn remove_custom_section(&mut self, id: i64) -> bool {
        let before = self.custom_sections.len();
        self.custom_sections.retain(|s| s.id != id);
        self.custom_sections.len() < before
    }

    pub fn custom_section_mut(&mut self, id: i64) -> Option<&mut CustomSection> {
        self.custom_sections.iter_mut().find(|s| s.id == id)
    }

    // ===== Text Field Round-trips =====

    /// Skills as edited: one comma-joined line.
    pub fn skills_text(&self) -> String {
        self.skills.join(", ")
    }

    /// Achievements as edited: one per line.
    pub fn achievements_text(&self) -> String {
        self.achievements.join("\n")
    }
}

/// Parse the skills edit field: split on commas and trim. Empty entries
/// are preserved, so a trailing comma yields a trailing empty skill.
pub fn parse_skills_input(text: &str) -> Vec<String> {
    text.split(',').map(|s| s.trim().to_string()).collect()
}

/// Parse the achievements edit field: one achievement per line, kept raw.
pub fn parse_achievements_input(text: &str) -> Vec<String> {
    text.split('\n').map(|s| s.to_string()).collect()
}
