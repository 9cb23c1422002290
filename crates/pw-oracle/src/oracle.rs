//! The oracle capability seen by the pipeline.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Backend, OracleConfig};
use crate::error::OracleResult;
use crate::gemini::GeminiClient;
use crate::ollama::OllamaClient;

/// A generative-text service: prompt in, free-form text out.
///
/// Replies may be malformed and must be parsed by the caller. Transport
/// faults come back as `Err` and are never retried here.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send a prompt and return the raw reply text.
    async fn generate(&self, prompt: &str) -> OracleResult<String>;

    /// Backend name (for logging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Oracle + ?Sized> Oracle for Arc<T> {
    async fn generate(&self, prompt: &str) -> OracleResult<String> {
        (**self).generate(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Oracle + ?Sized> Oracle for Box<T> {
    async fn generate(&self, prompt: &str) -> OracleResult<String> {
        (**self).generate(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Build the configured backend.
pub fn build_oracle(config: &OracleConfig) -> OracleResult<Arc<dyn Oracle>> {
    let oracle: Arc<dyn Oracle> = match config.backend {
        Backend::Gemini => Arc::new(GeminiClient::new(config)?),
        Backend::Ollama => Arc::new(OllamaClient::new(config)?),
    };
    tracing::info!(
        backend = oracle.name(),
        model = config.model(),
        host = config.host(),
        "oracle backend ready"
    );
    Ok(oracle)
}
