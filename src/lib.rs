// src/lib.rs
//! Resume builder core: a persistent resume document, completion
//! tracking, plain-text and typst projections, a Gemini-backed
//! suggestion client, and the relay server that keeps the API key
//! off the client.

pub mod ai;
pub mod cli;
pub mod config;
pub mod render;
pub mod session;
pub mod store;
pub mod types;
pub mod web;

pub use ai::{GenerationError, SuggestionClient};
pub use config::AppConfig;
pub use session::{AppMode, BuilderSession, SuggestionSection};
pub use store::ResumeStore;
pub use types::ResumeDocument;
pub use web::start_relay_server;
