//! `pickwise analyze`: score recommendations against recorded purchases.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pw_analyzer::{AnalysisResult, analyze, format_comparison, format_report};
use serde::Serialize;

use crate::data::{self, DataDir};

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    #[arg(short, long, default_value = "data", help = "Directory holding messages, products and history")]
    pub data_dir: PathBuf,
    #[arg(short, long, help = "Recommendations CSV to analyze (default: historical)")]
    pub recommendations: Option<PathBuf>,
    #[arg(long, requires = "recommendations", help = "Compare the given recommendations against historical")]
    pub compare: bool,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

/// One named analysis, with derived rates alongside the raw counts.
#[derive(Debug, Serialize)]
struct NamedAnalysis<'a> {
    name: String,
    #[serde(flatten)]
    result: &'a AnalysisResult,
    exact_match_rate: f64,
    category_match_rate: f64,
    out_of_stock_rate: f64,
    recommendation_coverage: f64,
}

impl<'a> NamedAnalysis<'a> {
    fn new(name: impl Into<String>, result: &'a AnalysisResult) -> Self {
        Self {
            name: name.into(),
            result,
            exact_match_rate: result.exact_match_rate(),
            category_match_rate: result.category_match_rate(),
            out_of_stock_rate: result.out_of_stock_rate(),
            recommendation_coverage: result.recommendation_coverage(),
        }
    }
}

pub fn run<W: Write>(args: &AnalyzeArgs, out: &mut W) -> anyhow::Result<()> {
    let data = DataDir::new(&args.data_dir);
    let messages = data.messages()?;
    let products = data.products()?;

    let historical = || -> anyhow::Result<AnalysisResult> {
        Ok(analyze(&messages, &products, &data.history()?))
    };

    let reports: Vec<(String, AnalysisResult)> = match &args.recommendations {
        Some(path) if args.compare => {
            let candidate = analyze(&messages, &products, &data::read_recommendations(path)?);
            vec![
                ("Historical Recommendations".into(), historical()?),
                ("New Recommendations".into(), candidate),
            ]
        }
        Some(path) => {
            let result = analyze(&messages, &products, &data::read_recommendations(path)?);
            vec![(format!("Analysis: {}", path.display()), result)]
        }
        None => vec![("Historical Recommendations".into(), historical()?)],
    };

    tracing::info!(reports = reports.len(), "analysis complete");

    if args.json {
        let named: Vec<NamedAnalysis<'_>> = reports
            .iter()
            .map(|(name, result)| NamedAnalysis::new(name.as_str(), result))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&named)?)?;
        return Ok(());
    }

    for (name, result) in &reports {
        writeln!(out, "{}", format_report(result, name))?;
    }
    if let [(_, baseline), (_, candidate)] = reports.as_slice() {
        writeln!(out, "{}", format_comparison(baseline, candidate))?;
    }
    Ok(())
}
