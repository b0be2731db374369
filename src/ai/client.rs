// src/ai/client.rs
//! HTTP client for the suggestion relay

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::prompts;
use crate::types::resume::{ExperienceEntry, ResumeDocument};

const GENERATE_ENDPOINT: &str = "/api/gemini";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";
/// How many options a generate action asks for by default.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Generation failures, distinguishable to the caller. Display strings
/// are the user-facing notices. No automatic retry anywhere.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to generate content. Please check your internet connection and try again.")]
    Connectivity(#[source] reqwest::Error),
    #[error("Invalid request. Please check your input.")]
    InvalidRequest,
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,
    #[error("Gemini service is currently unavailable. Please try again later.")]
    ServiceUnavailable,
    #[error("Failed to generate content: {0}")]
    Unknown(String),
}

fn classify_status(status: u16) -> GenerationError {
    match status {
        400 => GenerationError::InvalidRequest,
        429 => GenerationError::RateLimit,
        s if s >= 500 => GenerationError::ServiceUnavailable,
        s => GenerationError::Unknown(format!("unexpected status {s}")),
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: String,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    content: String,
}

pub struct SuggestionClient {
    client: reqwest::Client,
    base_url: String,
}

impl SuggestionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Send one prompt, framed with the option-count instruction, and
    /// split the delimiter-separated response into options.
    pub async fn generate_options(
        &self,
        prompt: &str,
        n: usize,
    ) -> Result<Vec<String>, GenerationError> {
        let framed = format!(
            "You are a professional resume writer. Generate {n} distinct, concise, professional options suitable for a resume. Use bullet points where appropriate and keep the tone professional. Separate each option with a line containing only three dashes (---).\n\n{prompt}"
        );
        let url = format!("{}{}", self.base_url, GENERATE_ENDPOINT);
        debug!("Requesting {} option(s) from {}", n, url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                prompt: framed,
                model: DEFAULT_MODEL,
            })
            .send()
            .await
            .map_err(GenerationError::Connectivity)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Suggestion relay returned {}", status);
            return Err(classify_status(status.as_u16()));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Unknown(format!("malformed relay response: {err}")))?;

        Ok(split_options(&payload.content))
    }

    pub async fn generate_professional_summary(
        &self,
        doc: &ResumeDocument,
        n: usize,
    ) -> Result<Vec<String>, GenerationError> {
        self.generate_options(&prompts::professional_summary(doc, n), n)
            .await
    }

    pub async fn generate_achievements(
        &self,
        experience: &[ExperienceEntry],
        n: usize,
    ) -> Result<Vec<String>, GenerationError> {
        self.generate_options(&prompts::achievements(experience, n), n)
            .await
    }

    /// Skill recommendations come back as one comma-separated line per
    /// option; each is split into a trimmed list with empties filtered.
    pub async fn generate_skills_recommendations(
        &self,
        job_title: &str,
        existing_skills: &[String],
        industry: &str,
        n: usize,
    ) -> Result<Vec<Vec<String>>, GenerationError> {
        let prompt = prompts::skills_recommendations(job_title, existing_skills, industry, n);
        let options = self.generate_options(&prompt, n).await?;
        Ok(options.iter().map(|option| split_skill_list(option)).collect())
    }

    pub async fn generate_cover_letter(
        &self,
        doc: &ResumeDocument,
    ) -> Result<String, GenerationError> {
        let options = self.generate_options(&prompts::cover_letter(doc), 1).await?;
        options
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Unknown("empty response".into()))
    }

    pub async fn generate_job_description(
        &self,
        position: &str,
        company: &str,
    ) -> Result<String, GenerationError> {
        let options = self
            .generate_options(&prompts::job_description(position, company), 1)
            .await?;
        options
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Unknown("empty response".into()))
    }
}

/// Split a raw response on delimiter lines (three or more hyphens, alone
/// on a line), trim each piece, and drop empty pieces.
pub fn split_options(raw: &str) -> Vec<String> {
    let mut options = Vec::new();
    let mut current = String::new();
    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
            options.push(std::mem::take(&mut current));
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    options.push(current);

    options
        .into_iter()
        .map(|option| option.trim().to_string())
        .filter(|option| !option.is_empty())
        .collect()
}

/// Split one skill-list option on commas, trimming and dropping empties.
/// Looser than the model-layer skills parsing, which keeps empties.
pub fn split_skill_list(option: &str) -> Vec<String> {
    option
        .split(',')
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect()
}
