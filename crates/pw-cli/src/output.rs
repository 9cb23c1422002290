//! Human-readable output for the `recommend` command.

use std::collections::HashMap;
use std::fmt::Write;

use pw_protocol::{BatchRecord, PipelineResult, Product};

const HEADERS: [&str; 5] = ["product_id", "name", "price", "rating", "confidence"];

/// Render a single-message result, enriching picks with catalog details.
pub fn format_single(message: &str, result: &PipelineResult, catalog: &[Product]) -> String {
    let mut out = String::new();

    if result.recommendations.is_empty() {
        let _ = writeln!(out, "\nNo recommendations - user does not appear to have purchase intent.");
        let _ = writeln!(out, "Reasoning: {}", result.reasoning);
        return out;
    }

    let _ = writeln!(out, "\nMESSAGE: {message}");
    let _ = writeln!(out, "\nCATEGORIES: {}", result.categories.join(", "));
    let _ = writeln!(out, "RECOMMENDATIONS:");
    out.push_str(&recommendation_table(result, catalog));
    let _ = writeln!(out, "REASONING: {}\n", result.reasoning);
    out
}

/// Left-aligned table of ranked picks. Ids missing from the catalog get a
/// row with only id and confidence.
pub fn recommendation_table(result: &PipelineResult, catalog: &[Product]) -> String {
    let by_id: HashMap<&str, &Product> = catalog.iter().map(|p| (p.id.as_str(), p)).collect();

    let rows: Vec<[String; 5]> = result
        .recommendations
        .iter()
        .map(|rec| match by_id.get(rec.product_id.as_str()) {
            Some(p) => [
                rec.product_id.clone(),
                p.name.clone(),
                format!("${:.2}", p.price),
                format!("{}★", p.avg_rating),
                format!("{:.2}", rec.confidence),
            ],
            None => [
                rec.product_id.clone(),
                "-".into(),
                "-".into(),
                "-".into(),
                format!("{:.2}", rec.confidence),
            ],
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "  {}", line.join("  ").trim_end());
}

/// Closing summary after a batch run.
pub fn format_summary(records: &[BatchRecord]) -> String {
    let total = records.len();
    let intent = records.iter().filter(|r| r.should_recommend).count();
    let recommended = records.iter().filter(|r| r.has_recommendation()).count();

    let mut out = String::new();
    let _ = writeln!(out, "Purchase intent detected: {intent}/{total}");
    let _ = writeln!(out, "Recommendations made: {recommended}/{total}");
    out
}
