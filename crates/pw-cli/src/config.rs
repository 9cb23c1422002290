//! Application configuration, loadable from TOML and the environment.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use pw_oracle::OracleConfig;
use pw_pipeline::PipelineConfig;
use serde::Deserialize;

/// Top-level configuration for the `pickwise` binary.
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Oracle backend and connection settings.
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Business thresholds, category universe, validation policy.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Batch pacing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchConfig {
    /// Pause between messages, sized for the free-tier request quota.
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    /// Report progress after this many messages. 0 disables it.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

fn default_delay_secs() -> u64 {
    8
}

fn default_progress_every() -> usize {
    10
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            progress_every: default_progress_every(),
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl AppConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the effective config: `.env`, then the optional file, then
    /// process environment on top.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.oracle.apply_env()?;

        tracing::debug!(
            backend = ?config.oracle.backend,
            model = config.oracle.model(),
            min_stock = config.pipeline.min_stock,
            min_rating = config.pipeline.min_rating,
            delay_secs = config.batch.delay_secs,
            "config resolved"
        );
        Ok(config)
    }
}
