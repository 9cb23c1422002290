//! Plain-text rendering of analysis results.

use std::fmt::Write;

use crate::analysis::AnalysisResult;

const RULE: &str = "==================================================";

fn pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Percentage-point delta with an explicit sign, e.g. `+4.5pp`.
fn delta_pp(delta: f64) -> String {
    format!("{:+.1}pp", delta * 100.0)
}

/// Render one result as an Accuracy / Coverage / Quality report.
pub fn format_report(result: &AnalysisResult, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}\n {name}\n{RULE}\n");

    let _ = writeln!(out, "Accuracy:");
    let _ = writeln!(
        out,
        "  Exact Match Rate:      {:>6}  ({}/{})",
        pct(result.exact_match_rate()),
        result.exact_matches,
        result.messages_with_purchase
    );
    let _ = writeln!(
        out,
        "  Category Match Rate:   {:>6}  ({}/{})",
        pct(result.category_match_rate()),
        result.category_matches,
        result.messages_with_purchase
    );

    let _ = writeln!(out, "\nCoverage:");
    let _ = writeln!(
        out,
        "  Messages with Purchase: {}/{}",
        result.messages_with_purchase, result.total_messages
    );
    let _ = writeln!(out, "  Recommendations Made:   {}", result.recommendations_made);
    let _ = writeln!(
        out,
        "  Coverage Rate:          {}",
        pct(result.recommendation_coverage())
    );

    let _ = writeln!(out, "\nQuality:");
    let _ = writeln!(
        out,
        "  Out-of-Stock Rate:     {:>6}",
        pct(result.out_of_stock_rate())
    );
    let _ = writeln!(
        out,
        "  Avg Product Rating:    {:>6.2}",
        result.avg_recommended_rating
    );
    if let Some(confidence) = result.avg_confidence {
        let _ = writeln!(out, "  Avg Confidence:        {confidence:>6.2}");
    }

    out
}

/// Render a baseline-vs-candidate summary.
///
/// Out-of-stock is a lower-is-better metric, so its delta is reported as
/// the reduction (baseline minus candidate).
pub fn format_comparison(baseline: &AnalysisResult, candidate: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\n COMPARISON SUMMARY\n{RULE}");

    let rows = [
        (
            "Exact Match:   ",
            baseline.exact_match_rate(),
            candidate.exact_match_rate(),
            candidate.exact_match_rate() - baseline.exact_match_rate(),
        ),
        (
            "Category Match:",
            baseline.category_match_rate(),
            candidate.category_match_rate(),
            candidate.category_match_rate() - baseline.category_match_rate(),
        ),
        (
            "Out-of-Stock:  ",
            baseline.out_of_stock_rate(),
            candidate.out_of_stock_rate(),
            baseline.out_of_stock_rate() - candidate.out_of_stock_rate(),
        ),
    ];

    for (label, before, after, improvement) in rows {
        let _ = writeln!(
            out,
            "  {label} {:>6} → {:>6}  ({})",
            pct(before),
            pct(after),
            delta_pp(improvement)
        );
    }

    out
}
