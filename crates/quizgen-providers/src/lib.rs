//! quizgen-providers: Quiz-generation backends.
//!
//! Implements the `QuizBackend` trait for the quiz server's REST endpoint and
//! for OpenAI-compatible and Ollama chat models.

pub mod config;
mod http;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod server;

pub use config::{create_provider, load_config, ProviderConfig, QuizgenConfig};
pub use quizgen_core::error::ProviderError;
