//! Recommendation accuracy analyzer.
//!
//! Compares any set of recommendation rows (batch output or the historical
//! export) against the purchases customers actually made. Pure aggregation:
//! it never calls into the pipeline.

pub mod analysis;
pub mod report;

pub use analysis::{AnalysisResult, analyze};
pub use report::{format_comparison, format_report};
