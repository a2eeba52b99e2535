use async_trait::async_trait;
use serde::Deserialize;

use super::prompts::{assessment_prompt, structure_prompt, JSON_ONLY_SYSTEM};
use super::LlmClient;
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::refine::Refiner;

/// Probability that the document is a résumé.
#[derive(Debug, Deserialize)]
struct ResumeAssessment {
    confidence: f64,
}

/// [`Refiner`] backed by the Claude Messages API.
pub struct LlmRefiner {
    client: LlmClient,
}

impl LlmRefiner {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Refiner for LlmRefiner {
    fn name(&self) -> &str {
        self.client.model()
    }

    async fn refine(&self, section_context: &str, current: &ResumeDocument) -> Result<ResumeDocument, AppError> {
        let current_json = serde_json::to_string(current)?;
        let prompt = structure_prompt(section_context, &current_json);
        Ok(self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?)
    }

    async fn assess_resume(&self, text: &str) -> Result<Option<f64>, AppError> {
        let assessment: ResumeAssessment = self.client.call_json(&assessment_prompt(text), JSON_ONLY_SYSTEM).await?;
        Ok(Some(assessment.confidence.clamp(0.0, 1.0)))
    }
}
