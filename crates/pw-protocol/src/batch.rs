use serde::{Deserialize, Serialize};

use crate::results::PipelineResult;

/// One row of batch output: the ordered recommendations flattened into
/// three fixed slots. Empty slots serialize as empty CSV cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub message_id: String,
    pub should_recommend: bool,
    /// Category labels joined with ", ".
    pub categories: String,
    pub recommended_product_id: Option<String>,
    pub confidence: Option<f64>,
    pub second_product_id: Option<String>,
    pub second_confidence: Option<f64>,
    pub third_product_id: Option<String>,
    pub third_confidence: Option<f64>,
    pub reasoning: String,
}

impl BatchRecord {
    pub fn from_result(message_id: impl Into<String>, result: &PipelineResult) -> Self {
        let slot = |i: usize| {
            result
                .recommendations
                .get(i)
                .map(|r| (r.product_id.clone(), r.confidence))
                .unzip()
        };
        let (recommended_product_id, confidence) = slot(0);
        let (second_product_id, second_confidence) = slot(1);
        let (third_product_id, third_confidence) = slot(2);

        Self {
            message_id: message_id.into(),
            should_recommend: result.should_recommend,
            categories: result.categories.join(", "),
            recommended_product_id,
            confidence,
            second_product_id,
            second_confidence,
            third_product_id,
            third_confidence,
            reasoning: result.reasoning.clone(),
        }
    }

    pub fn has_recommendation(&self) -> bool {
        self.recommended_product_id.is_some()
    }
}

/// The slice of a recommendations file the analyzer reads.
///
/// Matches both batch output and the historical recommendations export,
/// which has no confidence column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub message_id: String,
    #[serde(default)]
    pub recommended_product_id: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl RecommendationRow {
    /// Recommended id, treating an empty cell as no recommendation.
    pub fn product_id(&self) -> Option<&str> {
        self.recommended_product_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

impl From<&BatchRecord> for RecommendationRow {
    fn from(record: &BatchRecord) -> Self {
        Self {
            message_id: record.message_id.clone(),
            recommended_product_id: record.recommended_product_id.clone(),
            confidence: record.confidence,
        }
    }
}
