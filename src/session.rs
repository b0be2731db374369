// src/session.rs
//! Builder session state machine.
//!
//! Owns the live resume document, writes every mutation through to the
//! store, and drives the suggestion workflow: context capture on the
//! first request, one in-flight request per section tagged with a
//! sequence number, and stale responses discarded on arrival.

use std::collections::HashMap;

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::ai::{GenerationError, SuggestionClient, DEFAULT_SUGGESTIONS};
use crate::render::{render_preview, to_typst};
use crate::store::ResumeStore;
use crate::types::{
    completion_report, overall_complete, parse_achievements_input, parse_skills_input,
    CompletionReport, CustomSection, EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument,
};

// ===== Modes and workflow states =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Landing,
    Builder,
}

/// The sections that can be filled from generated suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionSection {
    Summary,
    Achievements,
    Skills,
}

impl std::fmt::Display for SuggestionSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SuggestionSection::Summary => "summary",
            SuggestionSection::Achievements => "achievements",
            SuggestionSection::Skills => "skills",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionFlow {
    Idle,
    /// Waiting for the user to supply industry and dream job before the
    /// first request goes out.
    CollectingContext { section: SuggestionSection },
    AwaitingSuggestions { section: SuggestionSection, seq: u64 },
    PresentingOptions {
        section: SuggestionSection,
        options: Vec<String>,
    },
}

/// Ticket for one suggestion round-trip. Responses are only accepted
/// while the ticket matches the in-flight state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub section: SuggestionSection,
    pub seq: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Industry and dream job must be captured first; the request is
    /// parked until `provide_context` runs.
    NeedsContext,
    Requested(SuggestionRequest),
}

#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Options are now presented for selection.
    Applied,
    /// The ticket no longer matches the in-flight request; response dropped.
    Stale,
    Failed(GenerationError),
}

// ===== Session =====

pub struct BuilderSession {
    store: ResumeStore,
    doc: ResumeDocument,
    mode: AppMode,
    flow: SuggestionFlow,
    seqs: HashMap<SuggestionSection, u64>,
    context_prompted: bool,
}

impl BuilderSession {
    pub fn new(store: ResumeStore) -> Self {
        let doc = store.load();
        Self {
            store,
            doc,
            mode: AppMode::Landing,
            flow: SuggestionFlow::Idle,
            seqs: HashMap::new(),
            context_prompted: false,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn flow(&self) -> &SuggestionFlow {
        &self.flow
    }

    pub fn enter_builder(&mut self) {
        self.mode = AppMode::Builder;
    }

    /// Back to the landing mode. The document stays loaded.
    pub fn return_home(&mut self) {
        self.mode = AppMode::Landing;
    }

    // ===== Derived views =====

    pub fn preview(&self) -> String {
        render_preview(&self.doc)
    }

    pub fn export_markup(&self) -> String {
        to_typst(&self.doc)
    }

    pub fn completion(&self) -> CompletionReport {
        completion_report(&self.doc)
    }

    pub fn cover_letter_available(&self) -> bool {
        overall_complete(&self.doc)
    }

    // ===== Document updates (write-through) =====

    pub fn update_personal_info(&mut self, info: PersonalInfo) -> Result<()> {
        self.doc.set_personal_info(info);
        self.persist()
    }

    pub fn update_job_title(&mut self, job_title: &str) -> Result<()> {
        self.doc.set_job_title(job_title.to_string());
        self.persist()
    }

    pub fn update_summary(&mut self, summary: &str) -> Result<()> {
        self.doc.set_summary(summary.to_string());
        self.persist()
    }

    /// Replace the skills from the comma-separated edit field. Blank
    /// entries survive the split, matching what the form stores.
    pub fn update_skills_text(&mut self, text: &str) -> Result<()> {
        self.doc.set_skills(parse_skills_input(text));
        self.persist()
    }

    /// Replace the achievements from the one-per-line edit field.
    pub fn update_achievements_text(&mut self, text: &str) -> Result<()> {
        self.doc.set_achievements(parse_achievements_input(text));
        self.persist()
    }

    pub fn add_experience(&mut self) -> Result<i64> {
        let id = self.doc.add_experience();
        self.persist()?;
        Ok(id)
    }

    pub fn remove_experience(&mut self, id: i64) -> Result<bool> {
        let removed = self.doc.remove_experience(id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn edit_experience(
        &mut self,
        id: i64,
        edit: impl FnOnce(&mut ExperienceEntry),
    ) -> Result<bool> {
        match self.doc.experience_mut(id) {
            Some(entry) => {
                edit(entry);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_education(&mut self) -> Result<i64> {
        let id = self.doc.add_education();
        self.persist()?;
        Ok(id)
    }

    pub fn remove_education(&mut self, id: i64) -> Result<bool> {
        let removed = self.doc.remove_education(id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn edit_education(
        &mut self,
        id: i64,
        edit: impl FnOnce(&mut EducationEntry),
    ) -> Result<bool> {
        match self.doc.education_mut(id) {
            Some(entry) => {
                edit(entry);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_custom_section(&mut self, title: &str, content: &str) -> Result<i64> {
        let id = self.doc.add_custom_section();
        if let Some(section) = self.doc.custom_section_mut(id) {
            section.title = title.to_string();
            section.content = content.to_string();
        }
        self.persist()?;
        Ok(id)
    }

    pub fn remove_custom_section(&mut self, id: i64) -> Result<bool> {
        let removed = self.doc.remove_custom_section(id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn edit_custom_section(
        &mut self,
        id: i64,
        edit: impl FnOnce(&mut CustomSection),
    ) -> Result<bool> {
        match self.doc.custom_section_mut(id) {
            Some(section) => {
                edit(section);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ===== Suggestion workflow =====

    /// Start a suggestion round for `section`. A job title must exist
    /// first; the industry/dream-job context is collected once before
    /// the very first request of the session.
    pub fn request_suggestions(&mut self, section: SuggestionSection) -> Result<SuggestOutcome> {
        if self.doc.job_title.trim().is_empty() {
            bail!("Please enter your Job Title to generate AI suggestions");
        }

        if !self.context_prompted && !self.doc.has_context() {
            debug!("Collecting industry context before {} suggestions", section);
            self.flow = SuggestionFlow::CollectingContext { section };
            return Ok(SuggestOutcome::NeedsContext);
        }

        Ok(SuggestOutcome::Requested(self.begin_request(section)))
    }

    /// Record the captured context and resume the parked request, if any.
    pub fn provide_context(
        &mut self,
        industry: &str,
        dream_job: &str,
    ) -> Result<Option<SuggestionRequest>> {
        self.doc
            .set_context(industry.to_string(), dream_job.to_string());
        self.context_prompted = true;
        self.persist()?;

        let pending = match self.flow {
            SuggestionFlow::CollectingContext { section } => Some(self.begin_request(section)),
            _ => None,
        };
        Ok(pending)
    }

    fn begin_request(&mut self, section: SuggestionSection) -> SuggestionRequest {
        let seq = self.seqs.entry(section).or_insert(0);
        *seq += 1;
        info!("Requesting {} suggestions (seq {})", section, *seq);
        self.flow = SuggestionFlow::AwaitingSuggestions { section, seq: *seq };
        SuggestionRequest { section, seq: *seq }
    }

    /// Run the network round-trip for a ticket. Pure with respect to the
    /// session; the result goes back in through `deliver_suggestions`.
    pub async fn fetch_suggestions(
        &self,
        client: &SuggestionClient,
        request: &SuggestionRequest,
    ) -> Result<Vec<String>, GenerationError> {
        match request.section {
            SuggestionSection::Summary => {
                client
                    .generate_professional_summary(&self.doc, DEFAULT_SUGGESTIONS)
                    .await
            }
            SuggestionSection::Achievements => {
                client
                    .generate_achievements(&self.doc.experience, DEFAULT_SUGGESTIONS)
                    .await
            }
            SuggestionSection::Skills => {
                let lists = client
                    .generate_skills_recommendations(
                        &self.doc.job_title,
                        &self.doc.skills,
                        &self.doc.industry,
                        DEFAULT_SUGGESTIONS,
                    )
                    .await?;
                Ok(lists.into_iter().map(|list| list.join(", ")).collect())
            }
        }
    }

    /// Accept a finished round-trip. Responses whose ticket no longer
    /// matches the in-flight request are dropped without touching the
    /// document.
    pub fn deliver_suggestions(
        &mut self,
        request: &SuggestionRequest,
        result: Result<Vec<String>, GenerationError>,
    ) -> DeliveryOutcome {
        match self.flow {
            SuggestionFlow::AwaitingSuggestions { section, seq }
                if section == request.section && seq == request.seq =>
            {
                match result {
                    Ok(options) => {
                        info!("Received {} options for {}", options.len(), section);
                        self.flow = SuggestionFlow::PresentingOptions { section, options };
                        DeliveryOutcome::Applied
                    }
                    Err(error) => {
                        warn!("{} suggestions failed: {}", section, error);
                        self.flow = SuggestionFlow::Idle;
                        DeliveryOutcome::Failed(error)
                    }
                }
            }
            _ => {
                debug!(
                    "Dropping stale {} response (seq {})",
                    request.section, request.seq
                );
                DeliveryOutcome::Stale
            }
        }
    }

    pub fn suggestion_options(&self) -> &[String] {
        match &self.flow {
            SuggestionFlow::PresentingOptions { options, .. } => options,
            _ => &[],
        }
    }

    /// Commit the option at `index` into the section that requested it.
    pub fn select_suggestion(&mut self, index: usize) -> Result<()> {
        let (section, text) = match &self.flow {
            SuggestionFlow::PresentingOptions { section, options } => match options.get(index) {
                Some(text) => (*section, text.clone()),
                None => bail!("No suggestion at position {}", index + 1),
            },
            _ => bail!("No suggestions are pending"),
        };
        self.apply_suggestion(section, &text)
    }

    /// Commit user-edited suggestion text instead of a listed option.
    pub fn select_text(&mut self, text: &str) -> Result<()> {
        let section = match &self.flow {
            SuggestionFlow::PresentingOptions { section, .. } => *section,
            _ => bail!("No suggestions are pending"),
        };
        if text.trim().is_empty() {
            bail!("Cannot apply an empty suggestion");
        }
        self.apply_suggestion(section, text)
    }

    fn apply_suggestion(&mut self, section: SuggestionSection, text: &str) -> Result<()> {
        match section {
            SuggestionSection::Summary => self.doc.set_summary(text.to_string()),
            SuggestionSection::Achievements => {
                let items = text
                    .split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| line.to_string())
                    .collect();
                self.doc.set_achievements(items);
            }
            SuggestionSection::Skills => self.doc.set_skills(parse_skills_input(text)),
        }
        self.flow = SuggestionFlow::Idle;
        self.persist()
    }

    /// Abandon the pending options without mutating the document.
    pub fn cancel_suggestions(&mut self) {
        self.flow = SuggestionFlow::Idle;
    }

    // ===== Cover letter =====

    pub async fn generate_cover_letter(&self, client: &SuggestionClient) -> Result<String> {
        if !self.cover_letter_available() {
            bail!("Please fill out all resume details before generating a cover letter");
        }
        let letter = client.generate_cover_letter(&self.doc).await?;
        Ok(letter)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.doc)
    }
}
