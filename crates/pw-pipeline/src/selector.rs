//! Product selector, the second pipeline stage.
//!
//! Asks the oracle to rank the filtered candidates against the message.

use std::sync::Arc;

use async_trait::async_trait;
use pw_oracle::Oracle;
use pw_protocol::{Product, SelectionResult};

use crate::error::RecommendResult;
use crate::parser;
use crate::prompts;

/// Ranks candidate products for a message.
#[async_trait]
pub trait ProductSelector: Send + Sync {
    /// Pick up to 3 candidates, best first. An empty candidate list must
    /// return `SelectionResult::no_candidates()` without any oracle call.
    async fn select(&self, message: &str, candidates: &[Product])
    -> RecommendResult<SelectionResult>;
}

/// Oracle-backed selector. At most one oracle call per message, no retry.
pub struct OracleSelector {
    oracle: Arc<dyn Oracle>,
}

impl OracleSelector {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl ProductSelector for OracleSelector {
    async fn select(
        &self,
        message: &str,
        candidates: &[Product],
    ) -> RecommendResult<SelectionResult> {
        if candidates.is_empty() {
            tracing::debug!("no candidates, skipping selection call");
            return Ok(SelectionResult::no_candidates());
        }

        let prompt = prompts::selection_prompt(message, candidates);
        let reply = self.oracle.generate(&prompt).await?;

        match parser::decode::<SelectionResult>(&reply) {
            Ok(result) => {
                tracing::debug!(
                    picks = result.recommendations.len(),
                    candidates = candidates.len(),
                    "candidates ranked"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    oracle = self.oracle.name(),
                    "selection reply unparseable, returning no recommendations"
                );
                Ok(SelectionResult::parse_failure())
            }
        }
    }
}
