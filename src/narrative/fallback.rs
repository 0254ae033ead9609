use crate::model::AnalysisResult;
use std::fmt::Write;

/// Deterministic narrative used when the generation service is unavailable.
/// Missing summary fields render as 0; this never fails.
pub fn fallback_response(analysis: &AnalysisResult) -> String {
    let summary = &analysis.summary;
    let mut out = format!(
        "Based on historical {} data from {} to {}:\n\n",
        analysis.dataset.as_str().to_uppercase(),
        analysis.range.start(),
        analysis.range.end()
    );

    // writing into a String cannot fail
    if !summary.is_empty() {
        let _ = writeln!(out, "📈 **Performance Summary:**");
        let _ = writeln!(out, "• Total return: {:.2}%", summary.total_return_pct.unwrap_or(0.0));
        let _ = writeln!(
            out,
            "• Price range: ${:.2} - ${:.2}",
            summary.min_price.unwrap_or(0.0),
            summary.max_price.unwrap_or(0.0)
        );
        let _ = writeln!(out, "• Average volatility: {:.2}%\n", summary.volatility_pct.unwrap_or(0.0));
    }

    if !analysis.findings.is_empty() {
        let _ = writeln!(out, "🔍 **Patterns Detected:**");
        for finding in &analysis.findings {
            let _ = writeln!(out, "• {finding}");
        }
    }

    let _ = write!(
        out,
        "\n💡 **Key Insight:** This analysis is based on {} days of historical data.",
        summary.day_count
    );
    out
}
