use serde::{Deserialize, Serialize};

/// Contact block and headline of the candidate.
///
/// Every field is always present on the wire; an empty string (or empty list)
/// means the extractor found nothing for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    pub id: String,
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// True iff `end_date` reads "present", "current" or "now".
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Comma-joined list, e.g. "React, Node.js".
    pub technologies: String,
    pub link: String,
}

/// Full structured output of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Deduplicated, category-ordered, at most `MAX_SKILLS` entries.
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
}

impl ResumeDocument {
    pub fn is_empty(&self) -> bool {
        *self == ResumeDocument::default()
    }
}

/// Allocates per-entry id tokens ("exp-1", "edu-1", "proj-1", ...).
///
/// One allocator lives for one extraction call, so ids are never reused within
/// a document.
#[derive(Debug, Default)]
pub struct EntryIds {
    work: u32,
    education: u32,
    projects: u32,
}

impl EntryIds {
    pub fn next_work(&mut self) -> String {
        self.work += 1;
        format!("exp-{}", self.work)
    }

    pub fn next_education(&mut self) -> String {
        self.education += 1;
        format!("edu-{}", self.education)
    }

    pub fn next_project(&mut self) -> String {
        self.projects += 1;
        format!("proj-{}", self.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_serializes_every_field() {
        let json = serde_json::to_value(ResumeDocument::default()).unwrap();
        let info = &json["personalInfo"];
        for key in ["name", "position", "email", "phone", "location", "summary"] {
            assert_eq!(info[key], "", "missing or non-empty {key}");
        }
        assert!(info["links"].as_array().unwrap().is_empty());
        assert!(json["workExperience"].as_array().unwrap().is_empty());
        assert!(json["education"].as_array().unwrap().is_empty());
        assert!(json["skills"].as_array().unwrap().is_empty());
        assert!(json["projects"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_work_entry_uses_camel_case_dates() {
        let entry = WorkExperienceEntry {
            id: "exp-1".to_string(),
            start_date: "2020-01".to_string(),
            end_date: "Present".to_string(),
            current: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["startDate"], "2020-01");
        assert_eq!(json["endDate"], "Present");
        assert_eq!(json["current"], true);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"personalInfo": {"name": "Ada"}}"#).unwrap();
        assert_eq!(doc.personal_info.name, "Ada");
        assert!(doc.personal_info.email.is_empty());
        assert!(doc.work_experience.is_empty());
    }

    #[test]
    fn test_entry_ids_are_sequential_per_kind() {
        let mut ids = EntryIds::default();
        assert_eq!(ids.next_work(), "exp-1");
        assert_eq!(ids.next_work(), "exp-2");
        assert_eq!(ids.next_education(), "edu-1");
        assert_eq!(ids.next_project(), "proj-1");
    }

    #[test]
    fn test_is_empty() {
        assert!(ResumeDocument::default().is_empty());
        let mut doc = ResumeDocument::default();
        doc.skills.push("Rust".to_string());
        assert!(!doc.is_empty());
    }
}
