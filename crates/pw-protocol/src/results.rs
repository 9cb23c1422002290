use serde::{Deserialize, Deserializer, Serialize};

/// Reasoning reported when the oracle reply could not be decoded.
pub const PARSE_FAILURE_REASONING: &str = "Failed to parse LLM response";

/// Reasoning reported when the category filter left nothing to rank.
pub const NO_CANDIDATES_REASONING: &str = "No products available in matching categories";

/// Reasoning reported when the classifier declined without explaining why.
pub const NO_INTENT_REASONING: &str = "No purchase intent detected";

/// Output of the first pipeline stage.
///
/// Deserialized directly from the oracle's JSON reply; omitted fields fall
/// back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the message expresses purchase intent.
    #[serde(default)]
    pub should_recommend: bool,
    /// Relevant category labels, most relevant first.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    /// Set only on the parse-failure default. Never serialized, so the
    /// public shape matches a genuine "no intent" answer.
    #[serde(skip)]
    pub fallback: bool,
}

impl ClassificationResult {
    /// Fail-safe default used when the oracle reply is unparseable.
    pub fn parse_failure() -> Self {
        Self {
            should_recommend: false,
            categories: Vec::new(),
            reasoning: PARSE_FAILURE_REASONING.into(),
            fallback: true,
        }
    }
}

/// A single ranked product pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: String,
    /// Oracle-reported relevance, nominally 0.0 - 1.0. Not range-checked
    /// unless the pipeline's validation policy asks for it. Missing, null
    /// or non-numeric scores decode as 0.0; numeric strings are parsed.
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f64,
}

impl Recommendation {
    pub fn new(product_id: impl Into<String>, confidence: f64) -> Self {
        Self {
            product_id: product_id.into(),
            confidence,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfidence {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// A malformed score must not discard the rest of the ranking.
fn lenient_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Option::<RawConfidence>::deserialize(deserializer)? {
        Some(RawConfidence::Number(n)) => n,
        Some(RawConfidence::Text(s)) => s.trim().parse().unwrap_or(0.0),
        Some(RawConfidence::Other(_)) | None => 0.0,
    })
}

/// Output of the second pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Ranked picks, top pick first.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(skip)]
    pub fallback: bool,
}

impl SelectionResult {
    /// Returned without consulting the oracle when there is nothing to rank.
    pub fn no_candidates() -> Self {
        Self {
            recommendations: Vec::new(),
            reasoning: NO_CANDIDATES_REASONING.into(),
            fallback: false,
        }
    }

    /// Fail-safe default used when the oracle reply is unparseable.
    pub fn parse_failure() -> Self {
        Self {
            recommendations: Vec::new(),
            reasoning: PARSE_FAILURE_REASONING.into(),
            fallback: true,
        }
    }
}

/// Terminal state reached by a single pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Classifier found no purchase intent; nothing else ran.
    NoIntent,
    /// Filtering and selection both ran.
    Done,
}

/// Final per-message recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub should_recommend: bool,
    /// Categories proposed by the classifier, most relevant first.
    pub categories: Vec<String>,
    /// Size of the filtered candidate set. Absent when the pipeline exited
    /// before filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_candidates: Option<usize>,
    /// Ranked picks, top pick first.
    pub recommendations: Vec<Recommendation>,
    pub reasoning: String,
}

impl PipelineResult {
    /// Early-exit result for a message without purchase intent.
    pub fn no_intent(reasoning: impl Into<String>) -> Self {
        let reasoning = reasoning.into();
        Self {
            should_recommend: false,
            categories: Vec::new(),
            num_candidates: None,
            recommendations: Vec::new(),
            reasoning: if reasoning.is_empty() {
                NO_INTENT_REASONING.into()
            } else {
                reasoning
            },
        }
    }

    pub fn stage(&self) -> PipelineStage {
        if self.num_candidates.is_some() {
            PipelineStage::Done
        } else {
            PipelineStage::NoIntent
        }
    }

    /// The top-ranked pick, if any.
    pub fn top(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }
}
