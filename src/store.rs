// src/store.rs
//! JSON snapshot persistence: write-through on every change, shallow
//! merge onto defaults at load

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::ResumeDocument;

pub struct ResumeStore {
    path: PathBuf,
}

impl ResumeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, overlaying saved top-level fields onto a fresh
    /// default document. A missing, unreadable, or corrupt snapshot
    /// falls back to the defaults rather than failing the session.
    pub fn load(&self) -> ResumeDocument {
        if !self.path.exists() {
            debug!("No snapshot at {}, starting fresh", self.path.display());
            return ResumeDocument::default();
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Could not read snapshot {}: {}", self.path.display(), err);
                return ResumeDocument::default();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(saved) => merge_onto_defaults(saved),
            Err(err) => {
                warn!("Corrupt snapshot {}: {}", self.path.display(), err);
                ResumeDocument::default()
            }
        }
    }

    /// Persist the whole document. Called after every mutation, so the
    /// snapshot always equals the in-memory state.
    pub fn save(&self, doc: &ResumeDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(doc).context("Failed to serialize resume")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot: {}", self.path.display()))?;

        debug!("Snapshot written to {}", self.path.display());
        Ok(())
    }
}

/// Shallow merge: saved top-level keys replace default fields wholesale,
/// including empty sequences overwriting non-empty defaults. Missing keys
/// keep their defaults; there is no version tag and no deep merge.
pub fn merge_onto_defaults(saved: Value) -> ResumeDocument {
    let mut base = match serde_json::to_value(ResumeDocument::default()) {
        Ok(base) => base,
        Err(_) => return ResumeDocument::default(),
    };

    match (base.as_object_mut(), saved) {
        (Some(base_map), Value::Object(saved_map)) => {
            for (key, value) in saved_map {
                base_map.insert(key, value);
            }
        }
        _ => {
            warn!("Snapshot is not a JSON object, keeping defaults");
            return ResumeDocument::default();
        }
    }

    match serde_json::from_value(base) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("Snapshot shape mismatch, keeping defaults: {}", err);
            ResumeDocument::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join("resume.json"));
        assert_eq!(store.load(), ResumeDocument::default());
    }

    #[test]
    fn test_save_then_load_round_trips_non_default_fields() {
        let dir = tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join("resume.json"));

        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Jane Doe".into();
        doc.job_title = "Frontend Developer".into();
        doc.summary = "Ships fast.".into();
        doc.experience[0].company = "Acme".into();
        doc.skills = vec!["Rust".into(), "".into()];
        doc.add_custom_section();

        store.save(&doc).unwrap();
        assert_eq!(store.load(), doc);
    }

    #[test]
    fn test_partial_snapshot_keeps_defaults_for_missing_keys() {
        let merged = merge_onto_defaults(json!({ "jobTitle": "Designer" }));
        assert_eq!(merged.job_title, "Designer");
        // untouched sections keep their default blank entries
        assert_eq!(merged.experience.len(), 1);
        assert_eq!(merged.education.len(), 1);
    }

    #[test]
    fn test_saved_empty_sequence_overwrites_default() {
        let merged = merge_onto_defaults(json!({ "experience": [] }));
        assert!(merged.experience.is_empty());
        assert_eq!(merged.education.len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let merged = merge_onto_defaults(json!({
            "jobTitle": "Designer",
            "themeColor": "#14A4E6"
        }));
        assert_eq!(merged.job_title, "Designer");
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(&path, "{not json").unwrap();
        let store = ResumeStore::new(path);
        assert_eq!(store.load(), ResumeDocument::default());
    }

    #[test]
    fn test_non_object_snapshot_falls_back_to_defaults() {
        let merged = merge_onto_defaults(json!([1, 2, 3]));
        assert_eq!(merged, ResumeDocument::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join("nested/data/resume.json"));
        store.save(&ResumeDocument::default()).unwrap();
        assert!(store.path().exists());
    }
}
