//! Oracle clients for Pickwise.
//!
//! The pipeline only ever sees the `Oracle` trait: a prompt goes in, free-form
//! text comes out. This crate provides:
//! - `GeminiClient` for the Google Generative Language API
//! - `OllamaClient` for a local Ollama server
//! - `ScriptedOracle` for deterministic tests
//! - `build_oracle` to pick a backend from `OracleConfig`

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod oracle;

// Re-exports for convenience.
pub use config::{Backend, OracleConfig};
pub use error::{OracleError, OracleResult};
pub use gemini::GeminiClient;
pub use mock::ScriptedOracle;
pub use ollama::OllamaClient;
pub use oracle::{Oracle, build_oracle};
