//! Heuristic extraction core.
//!
//! Everything here is synchronous and infallible: pattern misses and
//! ambiguous layouts degrade to empty fields, never to errors.

pub mod classifier;
pub mod disambiguate;
pub mod education;
pub mod keywords;
pub mod patterns;
pub mod personal;
pub mod pipeline;
pub mod projects;
pub mod sections;
pub mod segmenter;
pub mod skills;
pub mod strategy;
pub mod work;

pub use classifier::{blend_confidence, ResumeClassifier, RESUME_THRESHOLD};
pub use keywords::{Dictionaries, SkillCategory};
pub use pipeline::{ExtractionOutcome, ExtractorSettings, ResumeExtractor};
