//! Personal info: name, position, contact details, links and summary.
//!
//! Looks at the header region (text before the first detected section, or
//! the first 500 characters when no section was found). Email and phone
//! fall back to the whole document when the header has none; links never do.

use crate::extraction::disambiguate::{merge_position, Disambiguator};
use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::{
    is_bullet_line, CITY_STATE, EMAIL, GITHUB, LINKEDIN, LOCATION_PHRASE, PHONE_PATTERNS,
    STREET_INDICATOR, SUMMARY_LABEL, URL, ZIP_CODE,
};
use crate::extraction::sections::is_section_header;
use crate::extraction::strategy::{run_ranked, Strategy};
use crate::models::{PersonalInfo, SectionSpan};

pub const HEADER_WINDOW: usize = 500;
const SUMMARY_WINDOW: usize = 1000;
const MAX_SUMMARY_CHARS: usize = 1000;
const MIN_SUMMARY_CHARS: usize = 50;
const MAX_LABELED_SUMMARY_LINES: usize = 10;
const NAME_SCAN_LINES: usize = 5;
const MAX_NAME_LINE_CHARS: usize = 80;

const SEGMENT_SEPARATORS: &[char] = &['|', '•', '·', '\t'];

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn header_region<'a>(text: &'a str, spans: &[SectionSpan]) -> &'a str {
    match spans.first() {
        Some(first) => &text[..first.start_offset],
        None => prefix_chars(text, HEADER_WINDOW),
    }
}

fn has_contact(line: &str) -> bool {
    EMAIL.is_match(line) || PHONE_PATTERNS.iter().any(|p| p.is_match(line)) || URL.is_match(line)
}

/// Removes email, phone and URL matches plus leftover separators.
fn strip_contact(line: &str) -> String {
    let mut out = EMAIL.replace_all(line, " ").into_owned();
    for pattern in PHONE_PATTERNS.iter() {
        out = pattern.replace_all(&out, " ").into_owned();
    }
    out = LINKEDIN.replace_all(&out, " ").into_owned();
    out = GITHUB.replace_all(&out, " ").into_owned();
    out = URL.replace_all(&out, " ").into_owned();
    out.split(SEGMENT_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn segments(line: &str) -> impl Iterator<Item = &str> {
    line.split(SEGMENT_SEPARATORS)
        .flat_map(|s| s.split(" - "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn link_key(link: &str) -> String {
    let lower = link.to_lowercase();
    let lower = lower
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    lower.trim_end_matches('/').to_string()
}

fn clean_link(link: &str) -> &str {
    link.trim_end_matches(['.', ',', ';', ')'])
}

/// Inputs shared by the summary strategies.
struct SummaryContext<'a> {
    text: &'a str,
    header: &'a str,
    name_line: &'a str,
}

fn is_header_like(line: &str, name_line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || has_contact(trimmed)
        || (!name_line.is_empty() && trimmed == name_line)
        || is_section_header(trimmed)
        || SUMMARY_LABEL.is_match(trimmed)
        || is_all_caps_heading(trimmed)
}

/// An all-caps line such as "CERTIFICATIONS".
fn is_all_caps_heading(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3
        && letters.iter().all(|c| c.is_uppercase())
        && line.split_whitespace().count() <= 5
}

fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn labeled_summary(ctx: &SummaryContext) -> Option<String> {
    let caps = SUMMARY_LABEL.captures(ctx.text)?;
    let label_end = caps.get(0)?.end();
    let mut parts: Vec<&str> = Vec::new();
    if let Some(inline) = caps.get(1).map(|m| m.as_str().trim()).filter(|s| !s.is_empty()) {
        parts.push(inline);
    }
    let had_inline = !parts.is_empty();
    for line in ctx.text[label_end..]
        .lines()
        .skip_while(|l| l.trim().is_empty() && !had_inline)
        .take(MAX_LABELED_SUMMARY_LINES)
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_section_header(trimmed) || is_all_caps_heading(trimmed) {
            break;
        }
        parts.push(trimmed);
    }
    let summary = parts.join(" ");
    (!summary.is_empty()).then_some(summary)
}

fn first_substantial_paragraph(ctx: &SummaryContext) -> Option<String> {
    paragraphs(ctx.header).into_iter().find_map(|para| {
        let body: Vec<&str> = para
            .into_iter()
            .filter(|l| !is_header_like(l, ctx.name_line))
            .collect();
        let joined = body.join(" ");
        (joined.chars().count() >= MIN_SUMMARY_CHARS).then_some(joined)
    })
}

fn longest_paragraph(ctx: &SummaryContext) -> Option<String> {
    paragraphs(prefix_chars(ctx.text, SUMMARY_WINDOW))
        .into_iter()
        .filter(|para| {
            para.first()
                .is_some_and(|first| !is_header_like(first, ctx.name_line) && !is_bullet_line(first))
                && !para.iter().any(|l| has_contact(l))
        })
        .map(|para| para.join(" "))
        .filter(|joined| joined.chars().count() >= MIN_SUMMARY_CHARS)
        .max_by_key(|joined| joined.chars().count())
}

/// Cuts at the last sentence end before `MAX_SUMMARY_CHARS`, or hard-cuts
/// when there is none.
fn truncate_summary(summary: String) -> String {
    if summary.chars().count() <= MAX_SUMMARY_CHARS {
        return summary;
    }
    let head = prefix_chars(&summary, MAX_SUMMARY_CHARS);
    match head.rfind(['.', '!', '?']) {
        Some(idx) => head[..=idx].to_string(),
        None => head.trim_end().to_string(),
    }
}

pub struct PersonalInfoExtractor<'a> {
    dict: &'a Dictionaries,
}

impl<'a> PersonalInfoExtractor<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    pub fn extract(&self, text: &str, spans: &[SectionSpan]) -> PersonalInfo {
        let header = header_region(text, spans);
        let mut info = PersonalInfo::default();

        let (name_line, name_idx) = self.name_line(header);
        let split = Disambiguator::new(self.dict).split(&name_line);
        info.name = split.name;
        info.position = merge_position("", &split.position);
        if let Some(title) = self.title_line(header, name_idx) {
            info.position = merge_position(&info.position, &title);
        }

        info.email = find_email(header)
            .or_else(|| find_email(text))
            .unwrap_or_default();
        info.phone = find_phone(header)
            .or_else(|| find_phone(text))
            .unwrap_or_default();
        info.location = self.find_location(header).unwrap_or_default();

        info.links = find_links(header);

        let ctx = SummaryContext {
            text,
            header,
            name_line: name_line.as_str(),
        };
        info.summary = extract_summary(&ctx).map(truncate_summary).unwrap_or_default();
        info
    }

    /// First short line among the opening lines once contact details are
    /// stripped, with its index among non-empty header lines.
    fn name_line(&self, header: &str) -> (String, Option<usize>) {
        header
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(NAME_SCAN_LINES)
            .enumerate()
            .find_map(|(idx, line)| {
                if is_section_header(line) || SUMMARY_LABEL.is_match(line) {
                    return None;
                }
                let stripped = strip_contact(line);
                let candidate = stripped.split(" | ").next().unwrap_or("").trim();
                let usable = !candidate.is_empty()
                    && candidate.chars().any(char::is_alphabetic)
                    && candidate.chars().count() <= MAX_NAME_LINE_CHARS
                    && !CITY_STATE.is_match(candidate);
                usable.then(|| {
                    // Keep a title that followed the name on the same line.
                    let rest: Vec<&str> = stripped.split(" | ").skip(1).collect();
                    let with_title = if rest.iter().any(|s| self.dict.line_has_title(s, 5)) {
                        format!("{candidate} | {}", rest.join(" | "))
                    } else {
                        candidate.to_string()
                    };
                    (with_title, Some(idx))
                })
            })
            .unwrap_or((String::new(), None))
    }

    /// A standalone title line right after the name line.
    fn title_line(&self, header: &str, name_idx: Option<usize>) -> Option<String> {
        let idx = name_idx? + 1;
        let line = header
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .nth(idx)?;
        let stripped = strip_contact(line);
        let candidate = stripped.split(" | ").next()?.trim();
        let is_title = !candidate.is_empty()
            && candidate.chars().count() <= 60
            && !candidate.ends_with('.')
            && self.dict.line_has_title(candidate, 5);
        is_title.then(|| candidate.to_string())
    }

    fn find_location(&self, header: &str) -> Option<String> {
        if let Some(caps) = LOCATION_PHRASE.captures(header) {
            let value = caps[1]
                .trim()
                .trim_end_matches(['.', ',', ';'])
                .trim()
                .to_string();
            if !value.is_empty() {
                return Some(value);
            }
        }

        let segs: Vec<&str> = header
            .lines()
            .flat_map(segments)
            .filter(|seg| !EMAIL.is_match(seg))
            .collect();
        let city_state = segs
            .iter()
            .find(|seg| CITY_STATE.is_match(seg) && !self.dict.line_has_title(seg, 5));
        if let Some(found) = city_state {
            return Some(found.to_string());
        }

        segs.iter()
            .find(|seg| {
                !PHONE_PATTERNS.iter().any(|p| p.is_match(seg))
                    && (STREET_INDICATOR.is_match(seg) || ZIP_CODE.is_match(seg))
            })
            .map(|seg| seg.to_string())
    }
}

fn extract_summary(ctx: &SummaryContext) -> Option<String> {
    let strategies: [Strategy<SummaryContext, String>; 3] = [
        Strategy::new("labeled_section", labeled_summary),
        Strategy::new("first_paragraph", first_substantial_paragraph),
        Strategy::new("longest_paragraph", longest_paragraph),
    ];
    run_ranked("summary", &strategies, ctx)
}

pub fn find_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First hit of the phone patterns, tried in order.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|p| p.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// LinkedIn, then GitHub, then any other URL, without duplicates.
pub fn find_links(text: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    let mut keys: Vec<String> = Vec::new();
    let candidates = LINKEDIN
        .find_iter(text)
        .chain(GITHUB.find_iter(text))
        .chain(URL.find_iter(text));
    for m in candidates {
        let link = clean_link(m.as_str());
        let key = link_key(link);
        if key.is_empty() || keys.iter().any(|k| k == &key || k.starts_with(&key)) {
            continue;
        }
        keys.push(key);
        links.push(link.to_string());
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::sections::detect_sections;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> PersonalInfo {
        let dict = Dictionaries::default();
        let spans = detect_sections(text);
        PersonalInfoExtractor::new(&dict).extract(text, &spans)
    }

    #[test]
    fn test_basic_header() {
        let info = extract(
            "John Smith\njohn@x.com\n555-123-4567\nEXPERIENCE\nSenior Engineer\nAcme Inc",
        );
        assert_eq!(info.name, "John Smith");
        assert_eq!(info.email, "john@x.com");
        assert_eq!(info.phone, "555-123-4567");
        assert_eq!(info.position, "");
    }

    #[test]
    fn test_fused_name_and_title() {
        let info = extract("Jane Doe Fullstack Developer\njane@doe.dev\n\nSKILLS\nRust");
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.position, "Fullstack Developer");
    }

    #[test]
    fn test_title_on_next_line() {
        let info = extract("Ana Lima\nSenior Product Designer\nana@lima.io\n\nEXPERIENCE\nx");
        assert_eq!(info.name, "Ana Lima");
        assert_eq!(info.position, "Senior Product Designer");
    }

    #[test]
    fn test_contact_line_with_location_and_links() {
        let info = extract(
            "Priya Nair\nAustin, TX | priya@mail.com | (512) 555-0199 | linkedin.com/in/priya | https://github.com/priya\n\nEXPERIENCE\nx",
        );
        assert_eq!(info.location, "Austin, TX");
        assert_eq!(info.phone, "(512) 555-0199");
        assert_eq!(
            info.links,
            vec!["linkedin.com/in/priya".to_string(), "https://github.com/priya".to_string()]
        );
    }

    #[test]
    fn test_location_phrase_preferred() {
        let info = extract("Sam Lee\nBased in Lisbon, Portugal.\nsam@lee.pt\n\nSKILLS\nGo");
        assert_eq!(info.location, "Lisbon, Portugal");
    }

    #[test]
    fn test_address_fallback() {
        let info = extract("Sam Lee\n42 Harbor Street, Springfield 62704\nsam@lee.com\n\nSKILLS\nGo");
        assert_eq!(info.location, "42 Harbor Street, Springfield 62704");
    }

    #[test]
    fn test_contact_falls_back_to_whole_document() {
        let info = extract("Sam Lee\n\nEXPERIENCE\nEngineer\n\nContact: sam@lee.com, 555.123.4567");
        assert_eq!(info.email, "sam@lee.com");
        assert_eq!(info.phone, "555.123.4567");
    }

    #[test]
    fn test_labeled_summary() {
        let info = extract(
            "Jane Doe\njane@doe.dev\n\nSummary:\nBackend engineer with eight years building payment systems.\nLoves Rust.\n\nEXPERIENCE\nx",
        );
        assert_eq!(
            info.summary,
            "Backend engineer with eight years building payment systems. Loves Rust."
        );
    }

    #[test]
    fn test_inline_labeled_summary() {
        let info = extract(
            "Jane Doe\njane@doe.dev\n\nSummary: Backend engineer with eight years building payment systems.\n\nEXPERIENCE\nx",
        );
        assert_eq!(
            info.summary,
            "Backend engineer with eight years building payment systems."
        );
    }

    #[test]
    fn test_links_come_from_header_only() {
        let info = extract(
            "Jane Doe\njane@x.com\n\nPROJECTS\nTaskFlow | Rust\nhttps://github.com/jane/taskflow",
        );
        assert_eq!(info.email, "jane@x.com");
        assert!(info.links.is_empty());
    }

    #[test]
    fn test_unlabeled_paragraph_summary() {
        let info = extract(
            "Jane Doe\njane@doe.dev\n\nPragmatic engineer focused on reliable distributed systems and clear APIs.\n\nEXPERIENCE\nx",
        );
        assert_eq!(
            info.summary,
            "Pragmatic engineer focused on reliable distributed systems and clear APIs."
        );
    }

    #[test]
    fn test_no_sections_uses_prefix_window() {
        let info = extract("Lee Chen\nlee@chen.org");
        assert_eq!(info.name, "Lee Chen");
        assert_eq!(info.email, "lee@chen.org");
        assert!(info.summary.is_empty());
    }

    #[test]
    fn test_truncate_summary_on_sentence() {
        let sentence = "Built reliable systems for many teams. ";
        let long = sentence.repeat(40);
        let cut = truncate_summary(long);
        assert!(cut.chars().count() <= MAX_SUMMARY_CHARS);
        assert!(cut.ends_with('.'));
    }

    #[test]
    fn test_prefix_chars_is_char_safe() {
        assert_eq!(prefix_chars("héllo", 2), "hé");
        assert_eq!(prefix_chars("ab", 10), "ab");
    }
}
