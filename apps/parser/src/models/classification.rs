use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Verdict of the résumé classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_resume: bool,
    /// 0.0 – 1.0
    pub confidence: f64,
    pub detected_sections: BTreeSet<String>,
    pub reasoning: String,
}

impl ClassificationResult {
    /// The verdict for empty or unusable input.
    pub fn rejected(reasoning: impl Into<String>) -> Self {
        Self {
            is_resume: false,
            confidence: 0.0,
            detected_sections: BTreeSet::new(),
            reasoning: reasoning.into(),
        }
    }
}
