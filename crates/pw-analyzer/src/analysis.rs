//! Accuracy metrics for a recommendation set.

use std::collections::HashMap;

use pw_protocol::{Message, Product, RecommendationRow};
use serde::Serialize;

/// Aggregate metrics for one recommendation set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_messages: usize,
    /// Messages with a recorded purchase (the ground truth population).
    pub messages_with_purchase: usize,
    /// Purchasers who received a recommendation.
    pub recommendations_made: usize,
    pub exact_matches: usize,
    pub category_matches: usize,
    /// Recommendations for products with no stock (or not in the catalog).
    pub out_of_stock_recommendations: usize,
    /// Mean rating of recommended catalog products; 0.0 when none.
    pub avg_recommended_rating: f64,
    /// Mean confidence, only when the set carries confidence scores.
    pub avg_confidence: Option<f64>,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

impl AnalysisResult {
    /// Share of purchasers who were recommended exactly what they bought.
    pub fn exact_match_rate(&self) -> f64 {
        ratio(self.exact_matches, self.messages_with_purchase)
    }

    /// Share of purchasers recommended something in the right category.
    pub fn category_match_rate(&self) -> f64 {
        ratio(self.category_matches, self.messages_with_purchase)
    }

    /// Share of recommendations pointing at out-of-stock products.
    pub fn out_of_stock_rate(&self) -> f64 {
        ratio(self.out_of_stock_recommendations, self.recommendations_made)
    }

    /// Share of purchasers who got any recommendation.
    pub fn recommendation_coverage(&self) -> f64 {
        ratio(self.recommendations_made, self.messages_with_purchase)
    }
}

/// Score `rows` against the purchases recorded on `messages`.
///
/// Only the first row per message id counts.
pub fn analyze(messages: &[Message], products: &[Product], rows: &[RecommendationRow]) -> AnalysisResult {
    let catalog: HashMap<&str, &Product> = products.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut first_rows: HashMap<&str, &RecommendationRow> = HashMap::new();
    for row in rows {
        first_rows.entry(row.message_id.as_str()).or_insert(row);
    }

    let mut messages_with_purchase = 0;
    let mut recommendations_made = 0;
    let mut exact_matches = 0;
    let mut category_matches = 0;
    let mut out_of_stock = 0;
    let mut ratings = Vec::new();
    let mut confidences = Vec::new();

    for message in messages {
        let Some(actual) = message.purchased_product() else {
            continue;
        };
        messages_with_purchase += 1;

        let Some(row) = first_rows.get(message.id.as_str()) else {
            continue;
        };
        let Some(recommended) = row.product_id() else {
            continue;
        };
        recommendations_made += 1;

        if recommended == actual {
            exact_matches += 1;
        }

        let actual_product = catalog.get(actual);
        let recommended_product = catalog.get(recommended);

        if let (Some(a), Some(r)) = (actual_product, recommended_product) {
            if a.category == r.category {
                category_matches += 1;
            }
        }

        match recommended_product {
            Some(p) => {
                if !p.in_stock() {
                    out_of_stock += 1;
                }
                if p.avg_rating > 0.0 {
                    ratings.push(p.avg_rating);
                }
            }
            None => {
                tracing::debug!(product_id = recommended, "recommended product not in catalog");
                out_of_stock += 1;
            }
        }

        if let Some(confidence) = row.confidence.filter(|c| !c.is_nan()) {
            confidences.push(confidence);
        }
    }

    AnalysisResult {
        total_messages: messages.len(),
        messages_with_purchase,
        recommendations_made,
        exact_matches,
        category_matches,
        out_of_stock_recommendations: out_of_stock,
        avg_recommended_rating: mean(&ratings).unwrap_or(0.0),
        avg_confidence: mean(&confidences),
    }
}
