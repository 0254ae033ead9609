use crate::model::AnalysisResult;
use crate::narrative::fallback::fallback_response;
use crate::narrative::prompt::build_prompt;
use crate::narrative::traits::TextGenerator;
use std::sync::Arc;
use tracing::{info, warn};

/// Turns an analysis into prose, falling back to a template when generation fails.
pub struct NarrativeComposer {
    generator: Arc<dyn TextGenerator>,
}

impl NarrativeComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn compose(&self, query: &str, analysis: &AnalysisResult) -> String {
        let prompt = build_prompt(query, analysis);
        match self.generator.generate(&prompt).await {
            Ok(text) => {
                info!("✅ Narrative generated ({} chars)", text.len());
                text
            }
            Err(e) => {
                warn!("❌ Narrative generation error, using fallback: {}", e);
                fallback_response(analysis)
            }
        }
    }
}
