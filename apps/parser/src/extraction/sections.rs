//! Section boundary detection.
//!
//! Headers are whole lines ("WORK EXPERIENCE", "Education:", ...). For each
//! section type the earliest line matching any of its header patterns fixes
//! that section's start. Spans run to the next section's start or the end of
//! the document.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{SectionSpan, SectionType};

fn header(pattern: &str) -> Regex {
    Regex::new(&format!(r"(?im)^[ \t]*(?:{pattern})[ \t]*:?[ \t]*$")).unwrap()
}

lazy_static! {
    static ref HEADER_PATTERNS: Vec<(SectionType, Vec<Regex>)> = vec![
        (
            SectionType::Experience,
            vec![
                header(r"(?:work|professional|relevant)[ \t]+experience"),
                header(r"experience"),
                header(r"employment(?:[ \t]+history)?"),
                header(r"(?:work|career)[ \t]+history"),
                header(r"professional[ \t]+background"),
            ],
        ),
        (
            SectionType::Education,
            vec![
                header(r"education(?:al)?(?:[ \t]+(?:background|history))?"),
                header(r"academic[ \t]+(?:background|history|qualifications)"),
                header(r"education[ \t]*(?:&|and)[ \t]*(?:training|certifications)"),
            ],
        ),
        (
            SectionType::Skills,
            vec![
                header(r"(?:technical|core|key|professional)?[ \t]*skills(?:[ \t]*(?:&|and)[ \t]*(?:tools|technologies|expertise|abilities))?"),
                header(r"technologies"),
                header(r"tech(?:nical)?[ \t]+stack"),
                header(r"(?:core[ \t]+)?competencies"),
            ],
        ),
        (
            SectionType::Projects,
            vec![header(r"(?:personal|academic|key|selected|side|technical)?[ \t]*projects")],
        ),
    ];
}

/// True if `line` on its own is a recognized section header.
pub fn is_section_header(line: &str) -> bool {
    HEADER_PATTERNS
        .iter()
        .flat_map(|(_, patterns)| patterns.iter())
        .any(|p| p.is_match(line))
}

/// Offset just past the header line, skipping its newline.
fn body_start(text: &str, header_end: usize) -> usize {
    if text[header_end..].starts_with('\n') {
        header_end + 1
    } else {
        header_end
    }
}

/// Non-overlapping spans ordered by start offset.
pub fn detect_sections(text: &str) -> Vec<SectionSpan> {
    let mut found: Vec<(usize, usize, SectionType)> = HEADER_PATTERNS
        .iter()
        .filter_map(|(section_type, patterns)| {
            patterns
                .iter()
                .filter_map(|p| p.find(text))
                .min_by_key(|m| m.start())
                .map(|m| (m.start(), body_start(text, m.end()), *section_type))
        })
        .collect();

    found.sort_by_key(|(start, _, section_type)| (*start, section_type.detection_rank()));
    found.dedup_by_key(|(start, _, _)| *start);

    let spans: Vec<SectionSpan> = found
        .iter()
        .enumerate()
        .map(|(i, (start, body, section_type))| {
            let end = found.get(i + 1).map(|(next, _, _)| *next).unwrap_or(text.len());
            SectionSpan {
                section_type: *section_type,
                start_offset: *start,
                body_offset: (*body).min(end),
                end_offset: end,
            }
        })
        .collect();

    debug!(
        sections = ?spans.iter().map(|s| s.section_type.as_str()).collect::<Vec<_>>(),
        "sections detected"
    );
    spans
}

/// Body text of the first span of `section_type`, or "" when absent.
pub fn section_body<'a>(text: &'a str, spans: &[SectionSpan], section_type: SectionType) -> &'a str {
    spans
        .iter()
        .find(|s| s.section_type == section_type)
        .map(|s| s.body(text))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RESUME: &str = "Jane Doe\njane@example.com\n\nWORK EXPERIENCE\nEngineer at Acme\n\nEducation:\nMIT\n\nSkills\nRust, Go\n\nProjects\nParser";

    #[test]
    fn test_spans_ordered_and_contiguous() {
        let spans = detect_sections(RESUME);
        let types: Vec<_> = spans.iter().map(|s| s.section_type).collect();
        assert_eq!(
            types,
            vec![
                SectionType::Experience,
                SectionType::Education,
                SectionType::Skills,
                SectionType::Projects
            ]
        );
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end_offset, pair[1].start_offset);
        }
        assert_eq!(spans.last().unwrap().end_offset, RESUME.len());
    }

    #[test]
    fn test_body_excludes_header_line() {
        let spans = detect_sections(RESUME);
        assert_eq!(section_body(RESUME, &spans, SectionType::Skills).trim(), "Rust, Go");
        assert_eq!(
            section_body(RESUME, &spans, SectionType::Experience).trim(),
            "Engineer at Acme"
        );
    }

    #[test]
    fn test_missing_sections_absent() {
        let text = "Jane\nSKILLS\nRust";
        let spans = detect_sections(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(section_body(text, &spans, SectionType::Education), "");
    }

    #[test]
    fn test_inline_mentions_are_not_headers() {
        let text = "I have experience with education software.\nskills matter";
        assert!(detect_sections(text).is_empty());
    }

    #[test]
    fn test_header_at_document_end_has_empty_body() {
        let text = "Jane\nEXPERIENCE";
        let spans = detect_sections(text);
        assert_eq!(spans[0].body(text), "");
    }

    #[test]
    fn test_earliest_header_of_a_type_wins() {
        let text = "Jane\nEXPERIENCE\nEngineer at Acme\nRelevant Experience\nTutor\nSKILLS\nRust";
        let spans = detect_sections(text);
        assert_eq!(spans[0].section_type, SectionType::Experience);
        assert_eq!(spans[0].start_offset, 5);
        assert_eq!(
            section_body(text, &spans, SectionType::Experience),
            "Engineer at Acme\nRelevant Experience\nTutor\n"
        );
    }

    #[test]
    fn test_is_section_header() {
        assert!(is_section_header("  Technical Skills:"));
        assert!(is_section_header("PROFESSIONAL EXPERIENCE"));
        assert!(!is_section_header("Experience with Rust"));
    }
}
