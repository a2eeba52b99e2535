// Prompts for the refinement stage.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

const STRUCTURE_SCHEMA: &str = r#"{
  "personalInfo": {"name": "", "position": "", "email": "", "phone": "", "location": "", "summary": "", "links": []},
  "workExperience": [{"id": "", "position": "", "company": "", "location": "", "startDate": "", "endDate": "", "current": false, "description": ""}],
  "education": [{"id": "", "degree": "", "institution": "", "location": "", "startDate": "", "endDate": "", "description": ""}],
  "skills": [],
  "projects": [{"id": "", "name": "", "description": "", "technologies": "", "link": ""}]
}"#;

/// Asks the model to correct the heuristic extraction of `resume_text`.
pub fn structure_prompt(resume_text: &str, current_json: &str) -> String {
    format!(
        "Correct the structured data extracted from this resume.

Return a JSON object with this shape (camelCase keys):
{STRUCTURE_SCHEMA}

Rules:
- Keep the \"id\" of every entry you correct; use an empty id for entries that are missing from the current extraction.
- Use an empty string or empty list for any field you do not want to change.
- Never invent information that is not in the resume text.
- Dates as \"Jan 2020\", \"2020\" or \"Present\".
- Experience descriptions as bullet lines starting with \"•\", one accomplishment per line.
- Project descriptions and the summary as one short paragraph.
- Skills as individual technical skills with standard capitalization (JavaScript, Node.js, AWS), at most 16.

Current extraction:
{current_json}

Resume text:
{resume_text}"
    )
}

/// Asks the model whether `text` is a resume.
pub fn assessment_prompt(text: &str) -> String {
    format!(
        "Decide whether the following document is a resume or CV.

Return a JSON object: {{\"confidence\": <probability between 0 and 1 that it is a resume>}}

Document:
{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_prompt_embeds_inputs() {
        let prompt = structure_prompt("Jane Doe", "{\"skills\":[]}");
        assert!(prompt.contains("Resume text:\nJane Doe"));
        assert!(prompt.contains("Current extraction:\n{\"skills\":[]}"));
        assert!(prompt.contains("\"workExperience\""));
    }

    #[test]
    fn test_assessment_prompt_shape() {
        let prompt = assessment_prompt("hello");
        assert!(prompt.contains("{\"confidence\": <probability"));
        assert!(prompt.ends_with("Document:\nhello"));
    }
}
