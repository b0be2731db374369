// src/config.rs
//! Application configuration.
//!
//! Paths come from an optional `config.yaml` with `local` and `production`
//! sections, selected by the `ENVIRONMENT` variable. Service settings come
//! from environment variables so the API key never lands in a file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::ai::DEFAULT_RELAY_URL;
use crate::web::GEMINI_API_BASE;

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_STORE_PATH: &str = "data/resume.json";
const DEFAULT_OUTPUT_PATH: &str = "out";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the resume snapshot is persisted.
    pub store_path: PathBuf,
    /// Where exported documents are written.
    pub output_path: PathBuf,
    /// Relay endpoint the suggestion client talks to.
    pub relay_url: String,
    /// Upstream Gemini base URL the relay forwards to.
    pub gemini_api_url: String,
    /// Gemini credential. Empty means the relay cannot serve requests.
    pub gemini_api_key: String,
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PathSection {
    store_path: PathBuf,
    output_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: PathSection,
    production: PathSection,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let section = Self::load_path_section(&environment)?;

        Ok(Self {
            store_path: Self::resolve_path(&section.store_path)?,
            output_path: Self::resolve_path(&section.output_path)?,
            relay_url: std::env::var("RESUME_AI_URL")
                .unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| GEMINI_API_BASE.to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            environment,
        })
    }

    fn get_environment() -> String {
        std::env::var("RESUMAKE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_path_section(environment: &str) -> Result<PathSection> {
        let config_path = PathBuf::from(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(PathSection {
                store_path: PathBuf::from(DEFAULT_STORE_PATH),
                output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            });
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", CONFIG_FILE))?;
        let config_file = Self::parse_config(&content)?;

        Ok(Self::select_section(config_file, environment))
    }

    fn parse_config(content: &str) -> Result<ConfigFile> {
        serde_yaml::from_str(content).with_context(|| format!("Failed to parse {}", CONFIG_FILE))
    }

    fn select_section(config_file: ConfigFile, environment: &str) -> PathSection {
        match environment {
            "production" => config_file.production,
            _ => config_file.local,
        }
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure the store parent and output directory exist.
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        tokio::fs::create_dir_all(&self.output_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    self.output_path.display()
                )
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  store_path: data/resume.json
  output_path: out
production:
  store_path: /var/lib/resumake/resume.json
  output_path: /var/lib/resumake/out
"#;

    #[test]
    fn parses_both_sections() {
        let config = AppConfig::parse_config(SAMPLE).unwrap();
        assert_eq!(config.local.store_path, PathBuf::from("data/resume.json"));
        assert_eq!(
            config.production.output_path,
            PathBuf::from("/var/lib/resumake/out")
        );
    }

    #[test]
    fn selects_section_by_environment() {
        let config = AppConfig::parse_config(SAMPLE).unwrap();
        let section = AppConfig::select_section(config, "production");
        assert_eq!(
            section.store_path,
            PathBuf::from("/var/lib/resumake/resume.json")
        );

        let config = AppConfig::parse_config(SAMPLE).unwrap();
        let section = AppConfig::select_section(config, "staging");
        assert_eq!(section.store_path, PathBuf::from("data/resume.json"));
    }

    #[test]
    fn rejects_incomplete_config() {
        let result = AppConfig::parse_config("local:\n  store_path: data/resume.json\n");
        assert!(result.is_err());
    }

    #[test]
    fn absolute_paths_pass_through() {
        let resolved = AppConfig::resolve_path(Path::new("/tmp/resume.json")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/resume.json"));
    }

    #[test]
    fn relative_paths_are_anchored() {
        let resolved = AppConfig::resolve_path(Path::new("data/resume.json")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/resume.json"));
    }
}
