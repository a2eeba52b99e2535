//! Heuristic résumé text to structured data extractor.
//!
//! [`extraction::ResumeExtractor`] is the deterministic core; [`refine`]
//! wraps it with an optional, time-bounded LLM refinement pass.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod input;
pub mod llm_client;
pub mod models;
pub mod normalize;
pub mod refine;

pub use extraction::{ExtractionOutcome, ExtractorSettings, ResumeExtractor};
pub use models::{RawDocument, ResumeDocument};
