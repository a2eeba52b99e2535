//! Heuristic résumé classifier.
//!
//! Weighted evidence buckets, summed and capped at 1.0:
//!
//! | bucket | weight |
//! |---|---|
//! | contact (email / phone / profile link) | 0.20 |
//! | experience keywords | 0.25 |
//! | education keywords | 0.20 |
//! | skills keywords | 0.15 |
//! | structural indicators (matched / 4) | 0.20 |

use std::collections::BTreeSet;

use tracing::debug;

use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::{
    EMAIL, GITHUB, LINKEDIN, MONTH_YEAR, PHONE_PATTERNS, PRESENT, SENIORITY_TITLE, YEAR_MONTH,
};
use crate::models::ClassificationResult;

pub const CONTACT_WEIGHT: f64 = 0.2;
pub const EXPERIENCE_WEIGHT: f64 = 0.25;
pub const EDUCATION_WEIGHT: f64 = 0.2;
pub const SKILLS_WEIGHT: f64 = 0.15;
pub const STRUCTURE_WEIGHT: f64 = 0.2;

pub const RESUME_THRESHOLD: f64 = 0.5;

/// Share of the AI confidence when blending with the heuristic score.
pub const AI_WEIGHT: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct ResumeClassifier {
    dict: Dictionaries,
}

impl ResumeClassifier {
    pub fn new(dict: Dictionaries) -> Self {
        Self { dict }
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::rejected("empty document");
        }

        let lower = text.to_lowercase();
        let mut confidence = 0.0;
        let mut detected = BTreeSet::new();
        let mut evidence = Vec::new();

        let has_contact = EMAIL.is_match(text)
            || PHONE_PATTERNS.iter().any(|p| p.is_match(text))
            || LINKEDIN.is_match(text)
            || GITHUB.is_match(text);
        if has_contact {
            confidence += CONTACT_WEIGHT;
            detected.insert("contact".to_string());
            evidence.push("contact details");
        }

        let buckets = [
            ("experience", self.dict.experience_keywords, EXPERIENCE_WEIGHT),
            ("education", self.dict.education_keywords, EDUCATION_WEIGHT),
            ("skills", self.dict.skills_keywords, SKILLS_WEIGHT),
        ];
        for (name, keywords, weight) in buckets {
            if Dictionaries::contains_any(&lower, keywords) {
                confidence += weight;
                detected.insert(name.to_string());
                evidence.push(name);
            }
        }

        let indicators = [
            MONTH_YEAR.is_match(text),
            YEAR_MONTH.is_match(text),
            PRESENT.is_match(text),
            SENIORITY_TITLE.is_match(text),
        ];
        let matched = indicators.iter().filter(|hit| **hit).count();
        confidence += matched as f64 / indicators.len() as f64 * STRUCTURE_WEIGHT;

        let confidence = confidence.min(1.0);
        let is_resume = confidence >= RESUME_THRESHOLD;
        let reasoning = format!(
            "evidence: [{}]; structural indicators {}/{}; confidence {:.2} {} threshold {:.2}",
            evidence.join(", "),
            matched,
            indicators.len(),
            confidence,
            if is_resume { ">=" } else { "<" },
            RESUME_THRESHOLD
        );
        debug!(confidence, is_resume, "heuristic classification");

        ClassificationResult {
            is_resume,
            confidence,
            detected_sections: detected,
            reasoning,
        }
    }
}

/// Weighted average of an AI confidence with the heuristic one.
pub fn blend_confidence(heuristic: f64, ai: f64) -> f64 {
    let ai = ai.clamp(0.0, 1.0);
    (AI_WEIGHT * ai + (1.0 - AI_WEIGHT) * heuristic).clamp(0.0, 1.0)
}
