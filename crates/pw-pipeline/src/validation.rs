//! Optional hardening of selector output.
//!
//! Oracle output is trusted verbatim unless a policy flag is switched on.

use std::collections::HashSet;

use pw_protocol::{Product, SelectionResult};
use serde::Deserialize;

/// Post-selection checks applied by the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationPolicy {
    /// Clamp confidence into [0, 1]; NaN becomes 0.
    #[serde(default)]
    pub clamp_confidence: bool,
    /// Drop picks whose product id is not among the candidates.
    #[serde(default)]
    pub drop_unknown_ids: bool,
}

impl ValidationPolicy {
    /// Policy with every check switched on.
    pub fn strict() -> Self {
        Self {
            clamp_confidence: true,
            drop_unknown_ids: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.clamp_confidence || self.drop_unknown_ids
    }

    /// Apply the enabled checks. Rank order of surviving picks is kept.
    pub fn apply(&self, mut selection: SelectionResult, candidates: &[Product]) -> SelectionResult {
        if self.drop_unknown_ids {
            let known: HashSet<&str> = candidates.iter().map(|p| p.id.as_str()).collect();
            selection.recommendations.retain(|rec| {
                let keep = known.contains(rec.product_id.as_str());
                if !keep {
                    tracing::warn!(product_id = %rec.product_id, "dropping pick outside candidate set");
                }
                keep
            });
        }

        if self.clamp_confidence {
            for rec in &mut selection.recommendations {
                rec.confidence = if rec.confidence.is_nan() {
                    0.0
                } else {
                    rec.confidence.clamp(0.0, 1.0)
                };
            }
        }

        selection
    }
}
