//! Intent classifier, the first pipeline stage.
//!
//! Asks the oracle whether a message shows purchase intent and, if so,
//! which catalog categories are most relevant.

use std::sync::Arc;

use async_trait::async_trait;
use pw_oracle::Oracle;
use pw_protocol::ClassificationResult;

use crate::error::RecommendResult;
use crate::parser;
use crate::prompts;

/// Decides purchase intent for a message.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify one message. Oracle transport errors propagate; an
    /// unparseable reply yields `ClassificationResult::parse_failure()`.
    async fn classify(&self, message: &str) -> RecommendResult<ClassificationResult>;
}

/// Oracle-backed classifier. One oracle call per message, no retry.
pub struct OracleClassifier {
    oracle: Arc<dyn Oracle>,
    categories: Vec<String>,
}

impl OracleClassifier {
    pub fn new(oracle: Arc<dyn Oracle>, categories: Vec<String>) -> Self {
        Self { oracle, categories }
    }
}

#[async_trait]
impl IntentClassifier for OracleClassifier {
    async fn classify(&self, message: &str) -> RecommendResult<ClassificationResult> {
        let prompt = prompts::classification_prompt(message, &self.categories);
        let reply = self.oracle.generate(&prompt).await?;

        match parser::decode::<ClassificationResult>(&reply) {
            Ok(result) => {
                tracing::debug!(
                    should_recommend = result.should_recommend,
                    categories = ?result.categories,
                    "message classified"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    oracle = self.oracle.name(),
                    "classification reply unparseable, treating as no intent"
                );
                Ok(ClassificationResult::parse_failure())
            }
        }
    }
}
