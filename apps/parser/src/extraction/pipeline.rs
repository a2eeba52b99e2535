//! End-to-end extraction: classifier gate, section detection, per-section
//! extractors.

use serde::Serialize;
use tracing::{debug, info};

use crate::extraction::classifier::ResumeClassifier;
use crate::extraction::education::EducationExtractor;
use crate::extraction::keywords::Dictionaries;
use crate::extraction::personal::PersonalInfoExtractor;
use crate::extraction::projects::ProjectExtractor;
use crate::extraction::sections::{detect_sections, section_body};
use crate::extraction::skills::SkillsExtractor;
use crate::extraction::work::WorkExtractor;
use crate::models::{ClassificationResult, EntryIds, RawDocument, ResumeDocument, SectionType};

#[derive(Debug, Clone, Copy)]
pub struct ExtractorSettings {
    /// Skip extraction when the classifier rejects the document.
    pub enforce_gate: bool,
    pub dictionaries: Dictionaries,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            enforce_gate: true,
            dictionaries: Dictionaries::default(),
        }
    }
}

/// Classification plus the extracted document for one input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionOutcome {
    pub classification: ClassificationResult,
    pub resume: ResumeDocument,
}

pub struct ResumeExtractor {
    settings: ExtractorSettings,
    classifier: ResumeClassifier,
}

impl ResumeExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        Self {
            classifier: ResumeClassifier::new(settings.dictionaries),
            settings,
        }
    }

    pub fn classify(&self, doc: &RawDocument) -> ClassificationResult {
        self.classifier.classify(doc.text())
    }

    /// False when the gate is enforced and the verdict is negative.
    pub fn admits(&self, classification: &ClassificationResult) -> bool {
        !self.settings.enforce_gate || classification.is_resume
    }

    /// Runs every extractor regardless of the gate. Blank input yields the
    /// empty document.
    pub fn extract(&self, doc: &RawDocument) -> ResumeDocument {
        if doc.is_blank() {
            return ResumeDocument::default();
        }
        let dict = &self.settings.dictionaries;
        let text = doc.text();
        let spans = detect_sections(text);
        let mut ids = EntryIds::default();

        let resume = ResumeDocument {
            personal_info: PersonalInfoExtractor::new(dict).extract(text, &spans),
            work_experience: WorkExtractor::new(dict)
                .extract(section_body(text, &spans, SectionType::Experience), &mut ids),
            education: EducationExtractor::new(dict)
                .extract(section_body(text, &spans, SectionType::Education), &mut ids),
            skills: SkillsExtractor::new(dict).extract(section_body(text, &spans, SectionType::Skills)),
            projects: ProjectExtractor::new(dict)
                .extract(section_body(text, &spans, SectionType::Projects), &mut ids),
        };

        info!(
            sections = spans.len(),
            work = resume.work_experience.len(),
            education = resume.education.len(),
            skills = resume.skills.len(),
            projects = resume.projects.len(),
            "extraction complete"
        );
        resume
    }

    /// Classifies, then extracts unless the gate is enforced and rejects.
    pub fn process(&self, doc: &RawDocument) -> ExtractionOutcome {
        let classification = self.classify(doc);
        info!(
            is_resume = classification.is_resume,
            confidence = classification.confidence,
            source_len = doc.source_len(),
            "document classified"
        );

        if !self.admits(&classification) {
            debug!(reasoning = %classification.reasoning, "gate rejected document");
            return ExtractionOutcome {
                classification,
                resume: ResumeDocument::default(),
            };
        }

        ExtractionOutcome {
            resume: self.extract(doc),
            classification,
        }
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new(ExtractorSettings::default())
    }
}
