//! Pipeline configuration: business thresholds, category universe and
//! output validation.

use serde::Deserialize;

use crate::validation::ValidationPolicy;

/// Category labels offered to the classifier when none are configured.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Running Shoes",
    "Yoga",
    "Laptops",
    "Electronics",
    "Headphones",
    "Outerwear",
    "Water Bottles",
    "Kitchen",
    "Fitness",
    "Camping",
    "Wearables",
    "Audio",
    "Workwear",
    "Tablets",
    "Home",
];

/// Minimum units in stock for a product to be recommendable.
pub const DEFAULT_MIN_STOCK: u32 = 1;

/// Minimum average rating for a product to be recommendable (inclusive).
pub const DEFAULT_MIN_RATING: f64 = 3.5;

/// Explicit configuration handed to `Pipeline` at construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_min_stock")]
    pub min_stock: u32,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    /// Category universe shown to the classifier.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Post-selection checks. Off by default.
    #[serde(default)]
    pub validation: ValidationPolicy,
}

fn default_min_stock() -> u32 {
    DEFAULT_MIN_STOCK
}

fn default_min_rating() -> f64 {
    DEFAULT_MIN_RATING
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_stock: default_min_stock(),
            min_rating: default_min_rating(),
            categories: default_categories(),
            validation: ValidationPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_stock, 1);
        assert_eq!(config.min_rating, 3.5);
        assert_eq!(config.categories.len(), 15);
        assert_eq!(config.categories[0], "Running Shoes");
        assert!(!config.validation.is_enabled());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PipelineConfig = toml::from_str("min_rating = 4.0").unwrap();
        assert_eq!(config.min_rating, 4.0);
        assert_eq!(config.min_stock, 1);
        assert_eq!(config.categories.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn full_toml() {
        let toml_str = r#"
min_stock = 5
min_rating = 3.0
categories = ["Audio", "Tablets"]

[validation]
clamp_confidence = true
drop_unknown_ids = true
"#;
        let config: PipelineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.min_stock, 5);
        assert_eq!(config.categories, vec!["Audio", "Tablets"]);
        assert!(config.validation.clamp_confidence);
        assert!(config.validation.drop_unknown_ids);
    }
}
