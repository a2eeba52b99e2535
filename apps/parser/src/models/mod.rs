pub mod classification;
pub mod resume;
pub mod section;

pub use classification::ClassificationResult;
pub use resume::{EducationEntry, EntryIds, PersonalInfo, Project, ResumeDocument, WorkExperienceEntry};
pub use section::{RawDocument, SectionSpan, SectionType};
