//! Optional refinement stage around the deterministic extractor.
//!
//! A [`Refiner`] returns a partial document for the raw text and the
//! heuristic result; the stage bounds every call with a timeout, applies the
//! word limits, and merges non-empty fields. Any failure leaves the
//! heuristic output untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{blend_confidence, Dictionaries, ExtractionOutcome, ResumeExtractor, RESUME_THRESHOLD};
use crate::models::{ClassificationResult, RawDocument, ResumeDocument};

pub mod limits;
pub mod merge;

pub use limits::apply_word_limits;
pub use merge::merge_document;

#[async_trait]
pub trait Refiner: Send + Sync {
    fn name(&self) -> &str;

    /// Same-shaped partial document; empty fields mean "no opinion".
    async fn refine(&self, section_context: &str, current: &ResumeDocument) -> Result<ResumeDocument, AppError>;

    /// Confidence in [0, 1] that `text` is a résumé, when the refiner can tell.
    async fn assess_resume(&self, _text: &str) -> Result<Option<f64>, AppError> {
        Ok(None)
    }
}

pub struct RefinementStage {
    refiner: Arc<dyn Refiner>,
    timeout: Duration,
    dictionaries: Dictionaries,
}

impl RefinementStage {
    pub fn new(refiner: Arc<dyn Refiner>, timeout: Duration, dictionaries: Dictionaries) -> Self {
        Self {
            refiner,
            timeout,
            dictionaries,
        }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, AppError>
    where
        F: std::future::Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::RefinementTimeout(self.timeout.as_secs())),
        }
    }

    pub async fn refine_document(&self, text: &str, current: ResumeDocument) -> ResumeDocument {
        match self.bounded(self.refiner.refine(text, &current)).await {
            Ok(mut refined) => {
                apply_word_limits(&mut refined);
                info!(refiner = self.refiner.name(), "refinement merged");
                merge_document(current, &refined, &self.dictionaries)
            }
            Err(e) => {
                warn!(refiner = self.refiner.name(), code = e.code(), error = %e, "refinement failed, keeping heuristic result");
                current
            }
        }
    }

    /// Blends the refiner's confidence 80/20 with the heuristic one.
    pub async fn assess_classification(&self, text: &str, heuristic: ClassificationResult) -> ClassificationResult {
        match self.bounded(self.refiner.assess_resume(text)).await {
            Ok(Some(ai)) => {
                let confidence = blend_confidence(heuristic.confidence, ai);
                let is_resume = confidence >= RESUME_THRESHOLD;
                let reasoning = format!(
                    "{}; ai confidence {:.2} blended to {:.2}",
                    heuristic.reasoning, ai, confidence
                );
                ClassificationResult {
                    is_resume,
                    confidence,
                    reasoning,
                    ..heuristic
                }
            }
            Ok(None) => heuristic,
            Err(e) => {
                warn!(refiner = self.refiner.name(), code = e.code(), error = %e, "assessment failed, keeping heuristic verdict");
                heuristic
            }
        }
    }

    /// Assess, gate, extract, refine.
    pub async fn process(&self, extractor: &ResumeExtractor, doc: &RawDocument) -> ExtractionOutcome {
        let heuristic = extractor.classify(doc);
        let classification = if doc.is_blank() {
            heuristic
        } else {
            self.assess_classification(doc.text(), heuristic).await
        };
        if !extractor.admits(&classification) {
            return ExtractionOutcome {
                classification,
                resume: ResumeDocument::default(),
            };
        }
        let resume = self.refine_document(doc.text(), extractor.extract(doc)).await;
        ExtractionOutcome {
            classification,
            resume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalInfo, WorkExperienceEntry};
    use pretty_assertions::assert_eq;

    const JOHN: &str = "John Smith\njohn@x.com\n555-123-4567\nEXPERIENCE\nSenior Engineer\nAcme Inc\n2020 - Present\n• Built things\nSKILLS\nPython, React, AWS";

    struct FixedRefiner {
        refined: ResumeDocument,
        confidence: Option<f64>,
    }

    #[async_trait]
    impl Refiner for FixedRefiner {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn refine(&self, _context: &str, _current: &ResumeDocument) -> Result<ResumeDocument, AppError> {
            Ok(self.refined.clone())
        }

        async fn assess_resume(&self, _text: &str) -> Result<Option<f64>, AppError> {
            Ok(self.confidence)
        }
    }

    struct FailingRefiner;

    #[async_trait]
    impl Refiner for FailingRefiner {
        fn name(&self) -> &str {
            "failing"
        }

        async fn refine(&self, _context: &str, _current: &ResumeDocument) -> Result<ResumeDocument, AppError> {
            Err(AppError::InvalidInput("bad response".to_string()))
        }
    }

    struct SlowRefiner;

    #[async_trait]
    impl Refiner for SlowRefiner {
        fn name(&self) -> &str {
            "slow"
        }

        async fn refine(&self, _context: &str, _current: &ResumeDocument) -> Result<ResumeDocument, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(ResumeDocument::default())
        }

        async fn assess_resume(&self, _text: &str) -> Result<Option<f64>, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Some(1.0))
        }
    }

    fn stage(refiner: impl Refiner + 'static) -> RefinementStage {
        RefinementStage::new(Arc::new(refiner), Duration::from_secs(20), Dictionaries::default())
    }

    fn heuristic_doc() -> ResumeDocument {
        ResumeExtractor::default().extract(&RawDocument::new(JOHN))
    }

    #[tokio::test]
    async fn test_refinement_merges_non_empty_fields() {
        let refined = ResumeDocument {
            personal_info: PersonalInfo {
                summary: "Backend engineer focused on reliable payment systems.".to_string(),
                ..Default::default()
            },
            work_experience: vec![WorkExperienceEntry {
                id: "exp-1".to_string(),
                description: "• Built the billing platform\n• Cut costs by 30%".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let stage = stage(FixedRefiner {
            refined,
            confidence: None,
        });
        let merged = stage.refine_document(JOHN, heuristic_doc()).await;
        assert_eq!(
            merged.personal_info.summary,
            "Backend engineer focused on reliable payment systems."
        );
        assert_eq!(merged.personal_info.name, "John Smith");
        assert_eq!(merged.work_experience[0].company, "Acme Inc");
        assert_eq!(
            merged.work_experience[0].description,
            "<ul><li>Built the billing platform</li><li>Cut costs by 30%</li></ul>"
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_heuristic_result() {
        let merged = stage(FailingRefiner).refine_document(JOHN, heuristic_doc()).await;
        assert_eq!(merged, heuristic_doc());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_heuristic_result() {
        let stage = stage(SlowRefiner);
        assert_eq!(stage.refine_document(JOHN, heuristic_doc()).await, heuristic_doc());

        let heuristic = ResumeExtractor::default().classify(&RawDocument::new(JOHN));
        let assessed = stage.assess_classification(JOHN, heuristic.clone()).await;
        assert_eq!(assessed, heuristic);
    }

    #[tokio::test]
    async fn test_assessment_blends_confidence() {
        let stage = stage(FixedRefiner {
            refined: ResumeDocument::default(),
            confidence: Some(0.0),
        });
        let heuristic = ResumeExtractor::default().classify(&RawDocument::new(JOHN));
        assert!(heuristic.is_resume);
        let assessed = stage.assess_classification(JOHN, heuristic).await;
        assert!((assessed.confidence - 0.14).abs() < 1e-9);
        assert!(!assessed.is_resume);
        assert!(assessed.reasoning.contains("ai confidence 0.00"));
    }

    #[tokio::test]
    async fn test_default_assessment_is_neutral() {
        let outcome = stage(FailingRefiner)
            .process(&ResumeExtractor::default(), &RawDocument::new(JOHN))
            .await;
        assert!((outcome.classification.confidence - 0.7).abs() < 1e-9);
        assert_eq!(outcome.resume, heuristic_doc());
    }

    #[tokio::test]
    async fn test_process_gate_uses_blended_verdict() {
        let stage = stage(FixedRefiner {
            refined: ResumeDocument::default(),
            confidence: Some(0.0),
        });
        let outcome = stage
            .process(&ResumeExtractor::default(), &RawDocument::new(JOHN))
            .await;
        assert!(!outcome.classification.is_resume);
        assert!(outcome.resume.is_empty());
    }
}
