use crate::model::AnalysisResult;

const PERSONA: &str = "You are LiveTrader.ai, a friendly AI assistant that helps people \
understand stock market patterns and historical data.";

const TONE: &str = "Respond in a conversational, educational tone that makes complex \
financial concepts accessible to everyone.";

/// Structured context block describing the query and what the analysis found.
pub fn build_context(query: &str, analysis: &AnalysisResult) -> String {
    let summary = serde_json::to_string_pretty(&analysis.summary).unwrap_or_else(|_| "{}".into());
    format!(
        "User Query: {query}\n\n\
         Historical Data Analysis:\n\
         - Dataset: {dataset}\n\
         - Period: {start} to {end}\n\
         - Data Summary: {summary}\n\
         - Patterns Detected: {patterns}\n\n\
         Please provide a comprehensive, easy-to-understand analysis in plain English \
         that a non-financial person can understand. Include specific numbers, \
         historical context, and actionable insights.",
        dataset = analysis.dataset.as_str().to_uppercase(),
        start = analysis.range.start(),
        end = analysis.range.end(),
        patterns = analysis.findings.join(", "),
    )
}

/// Single conversational prompt sent to the generation service.
pub fn build_prompt(query: &str, analysis: &AnalysisResult) -> String {
    format!("{PERSONA}\n\n{}\n\n{TONE}", build_context(query, analysis))
}
