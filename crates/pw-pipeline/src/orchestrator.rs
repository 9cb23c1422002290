//! Pipeline orchestrator: one message in, one `PipelineResult` out.
//!
//! ```text
//! START → CLASSIFYING ─┬─ no intent ─→ NO_INTENT
//!                      └─ intent ────→ FILTERING → SELECTING → DONE
//! ```
//!
//! Every pass is terminal; nothing loops back or retries.

use std::sync::Arc;

use async_trait::async_trait;
use pw_oracle::Oracle;
use pw_protocol::{PipelineResult, Product};

use crate::classifier::{IntentClassifier, OracleClassifier};
use crate::config::PipelineConfig;
use crate::error::RecommendResult;
use crate::filter::filter_products;
use crate::selector::{OracleSelector, ProductSelector};

/// Anything that can turn a message into a recommendation.
///
/// The batch runner depends on this rather than on `Pipeline` so that the
/// dispatch strategy can change independently of per-message logic.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, message: &str, catalog: &[Product]) -> RecommendResult<PipelineResult>;
}

/// The two-stage recommendation pipeline.
pub struct Pipeline {
    classifier: Box<dyn IntentClassifier>,
    selector: Box<dyn ProductSelector>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        classifier: Box<dyn IntentClassifier>,
        selector: Box<dyn ProductSelector>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            selector,
            config,
        }
    }

    /// Wire both stages to the same oracle.
    pub fn with_oracle(oracle: Arc<dyn Oracle>, config: PipelineConfig) -> Self {
        let classifier = OracleClassifier::new(oracle.clone(), config.categories.clone());
        let selector = OracleSelector::new(oracle);
        Self::new(Box::new(classifier), Box::new(selector), config)
    }
}

#[async_trait]
impl Recommender for Pipeline {
    async fn recommend(&self, message: &str, catalog: &[Product]) -> RecommendResult<PipelineResult> {
        let classification = self.classifier.classify(message).await?;

        if !classification.should_recommend {
            tracing::debug!(
                parse_fallback = classification.fallback,
                "no purchase intent, stopping after classification"
            );
            return Ok(PipelineResult::no_intent(classification.reasoning));
        }

        let categories = classification.categories;
        let candidates = filter_products(
            catalog,
            &categories,
            self.config.min_stock,
            self.config.min_rating,
        );
        let num_candidates = candidates.len();
        tracing::debug!(?categories, num_candidates, "candidates filtered");

        let selection = self.selector.select(message, &candidates).await?;
        let selection = if self.config.validation.is_enabled() {
            self.config.validation.apply(selection, &candidates)
        } else {
            selection
        };

        if selection.fallback {
            tracing::debug!("selection fell back after unparseable reply");
        }

        Ok(PipelineResult {
            should_recommend: true,
            categories,
            num_candidates: Some(num_candidates),
            recommendations: selection.recommendations,
            reasoning: selection.reasoning,
        })
    }
}
