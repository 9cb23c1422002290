//! Oracle backend configuration, loadable from TOML and the environment.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Which oracle service answers prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Google Generative Language API.
    #[default]
    Gemini,
    /// Local Ollama server.
    Ollama,
}

impl Backend {
    pub fn default_model(self) -> &'static str {
        match self {
            // 15 req/min on the free tier, hence the batch delay default.
            Backend::Gemini => "gemini-2.5-flash-lite",
            Backend::Ollama => "llama3.2:3b",
        }
    }

    pub fn default_host(self) -> &'static str {
        match self {
            Backend::Gemini => "https://generativelanguage.googleapis.com",
            Backend::Ollama => "http://localhost:11434",
        }
    }
}

impl FromStr for Backend {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Backend::Gemini),
            "ollama" => Ok(Backend::Ollama),
            other => Err(OracleError::Config(format!("unknown oracle backend: {other}"))),
        }
    }
}

/// Oracle connection settings.
///
/// `model` and `host` default per backend when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    /// API key (Gemini only). Usually supplied via `GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model: None,
            host: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OracleConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .unwrap_or_else(|| self.backend.default_host())
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Overlay settings from process environment variables.
    pub fn apply_env(&mut self) -> Result<(), OracleError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay settings from an arbitrary variable lookup.
    ///
    /// Recognised: `PICKWISE_BACKEND`, `PICKWISE_MODEL`, `PICKWISE_ORACLE_HOST`,
    /// `GEMINI_API_KEY`. Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), OracleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = get("PICKWISE_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(model) = get("PICKWISE_MODEL") {
            self.model = Some(model);
        }
        if let Some(host) = get("PICKWISE_ORACLE_HOST") {
            self.host = Some(host);
        }
        if let Some(key) = get("GEMINI_API_KEY") {
            self.api_key = Some(key);
        }
        Ok(())
    }
}
