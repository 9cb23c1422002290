//! Product recommendation pipeline.
//!
//! A message goes through two oracle calls with deterministic business
//! rules in between:
//! 1. `classifier` decides purchase intent and proposes up to 3 categories.
//! 2. `filter` keeps in-stock, well-rated products in those categories.
//! 3. `selector` ranks up to 3 candidates with confidence scores.
//!
//! `orchestrator::Pipeline` wires the stages together and short-circuits
//! when there is no intent or nothing to rank.

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod selector;
pub mod validation;

// Re-export key types for convenience
pub use classifier::{IntentClassifier, OracleClassifier};
pub use config::{DEFAULT_CATEGORIES, PipelineConfig};
pub use error::{PipelineError, RecommendResult};
pub use filter::filter_products;
pub use orchestrator::{Pipeline, Recommender};
pub use parser::{parse_as, parse_record};
pub use selector::{OracleSelector, ProductSelector};
pub use validation::ValidationPolicy;
