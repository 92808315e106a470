//! # Slovo server
//!
//! HTTP front end for sentence analysis.
//!
//! Handles:
//! - `POST /api/analyze`: segmentation, translation and analysis per sentence
//! - `POST /api/export`: Markdown rendering of analyzed sentences
//! - the generative-language client and the rule-based fallback when no key is configured

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use gemini::{GeminiClient, GenerationConfig, ServiceError, TextService};
pub use pipeline::{Mode, Pipeline};
pub use routes::{router, AppState};
