// src/ai/mod.rs
//! Suggestion service client and prompt construction

pub mod client;
pub mod prompts;

pub use client::{
    split_options, split_skill_list, GenerationError, SuggestionClient, DEFAULT_MODEL,
    DEFAULT_RELAY_URL, DEFAULT_SUGGESTIONS,
};
