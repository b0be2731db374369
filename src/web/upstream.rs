// src/web/upstream.rs
//! Upstream Gemini API client used by the relay

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const UPSTREAM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to reach the Gemini service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        details: Option<Value>,
    },
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Forward one prompt and return the generated text. Upstream error
    /// bodies are kept so the relay can pass the status code through.
    pub async fn generate_content(&self, prompt: &str, model: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        debug!("Forwarding prompt to {}", url);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("upstream request failed")
                .to_string();
            warn!("Gemini upstream returned {}: {}", status, message);
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
                details: if body.is_null() { None } else { Some(body) },
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text: String = payload
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .iter()
                    .flat_map(|content| content.parts.iter())
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(UpstreamError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "Say hello" }],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"contents": [{"parts": [{"text": "Say hello"}]}]}));
    }

    #[test]
    fn test_response_text_extraction() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}
            ]
        }))
        .unwrap();
        let text: String = payload.candidates[0]
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_missing_credential_detection() {
        let client = GeminiClient::new(GEMINI_API_BASE, "").unwrap();
        assert!(!client.has_credential());
        let client = GeminiClient::new(GEMINI_API_BASE, "key").unwrap();
        assert!(client.has_credential());
    }
}
