//! Education entries: degree, institution, dates, location and GPA.

use regex::Match;

use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::{
    is_date_line, strip_bullet, CITY_STATE, DATE_RANGE, DATE_TOKEN, DEGREE, DEGREE_CUT, GPA,
    INSTITUTION, TRAILING_LOCATION, TRAILING_MONTH,
};
use crate::extraction::segmenter::EntrySegmenter;
use crate::models::{EducationEntry, EntryIds, SectionType};
use crate::normalize::{canonicalize_degree, clean_description, normalize_date, render_html};

const CONNECTOR_TAIL: &[&str] = &[" of", " at", " for", " de", " in", " and", ","];

/// Undotted abbreviations that double as ordinary words or US states.
fn needs_post_check(found: &str) -> bool {
    found.len() <= 5
        && !found.contains('.')
        && found.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_lowercase())
        && found.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && found.chars().skip(1).any(|c| c.is_ascii_uppercase())
}

/// First degree mention in `line`.
///
/// Undotted forms ("BS", "MA") only count when not preceded by ", " (as in
/// "Boston, MA") and when followed by more text. Dotted abbreviations must
/// not run into a lowercase word ("A. Smith").
pub fn find_degree(line: &str) -> Option<Match<'_>> {
    DEGREE.find_iter(line).find(|m| {
        let before = &line[..m.start()];
        let after = &line[m.end()..];
        if needs_post_check(m.as_str()) {
            let followed = after
                .trim_start_matches([' ', '\t', ','])
                .chars()
                .next()
                .is_some_and(char::is_alphabetic);
            return !before.ends_with(", ") && followed;
        }
        if m.as_str().contains('.') && m.as_str().len() <= 6 {
            return !after.chars().next().is_some_and(char::is_lowercase);
        }
        true
    })
}

/// Byte range of the degree phrase starting at `m`, ending before any
/// separator, date or "GPA".
fn degree_span(line: &str, m: &Match) -> (usize, usize) {
    let rest = &line[m.end()..];
    let mut end = rest.len();
    if let Some(cut) = DEGREE_CUT.find(rest) {
        end = end.min(cut.start());
    }
    if let Some(date) = DATE_TOKEN.find(rest) {
        end = end.min(date.start());
    }
    let mut phrase_end = m.end() + end;
    let mut phrase = line[m.start()..phrase_end].trim_end();
    if let Some(month) = TRAILING_MONTH.find(phrase) {
        phrase = &phrase[..month.start()];
    }
    phrase_end = m.start() + phrase.len();
    (m.start(), phrase_end)
}

fn trim_institution(raw: &str) -> String {
    let mut value = raw.trim().to_string();
    loop {
        let before = value.len();
        for tail in CONNECTOR_TAIL {
            if let Some(stripped) = value.strip_suffix(tail) {
                value = stripped.trim_end().to_string();
            }
        }
        if value.len() == before {
            return value;
        }
    }
}

fn find_institution(text: &str) -> Option<String> {
    INSTITUTION
        .captures(text)
        .map(|caps| trim_institution(&caps[1]))
        .filter(|s| !s.is_empty())
}

pub struct EducationExtractor<'a> {
    dict: &'a Dictionaries,
}

impl<'a> EducationExtractor<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    pub fn extract(&self, section_text: &str, ids: &mut EntryIds) -> Vec<EducationEntry> {
        EntrySegmenter::new(self.dict)
            .segment(SectionType::Education, section_text)
            .iter()
            .map(|fragment| self.parse_entry(fragment, ids.next_education()))
            .filter(|entry| !entry.degree.is_empty() || !entry.institution.is_empty())
            .collect()
    }

    pub fn parse_entry(&self, fragment: &str, id: String) -> EducationEntry {
        let mut entry = EducationEntry {
            id,
            ..Default::default()
        };
        let mut gpa: Option<String> = None;
        let mut description: Vec<&str> = Vec::new();
        let mut degree_line: Option<usize> = None;
        let lines: Vec<&str> = fragment
            .lines()
            .map(strip_bullet)
            .filter(|l| !l.is_empty())
            .collect();

        for (idx, &line) in lines.iter().enumerate() {
            let mut consumed = false;
            let mut remainder = line.to_string();

            if entry.degree.is_empty() {
                if let Some(m) = find_degree(line) {
                    let (start, end) = degree_span(line, &m);
                    entry.degree = canonicalize_degree(&line[start..end]);
                    remainder = format!("{} {}", &line[..start], &line[end..]);
                    degree_line = Some(idx);
                    consumed = true;
                }
            }

            if entry.institution.is_empty() {
                if let Some(institution) = find_institution(&remainder) {
                    entry.institution = institution;
                    consumed = true;
                }
            }

            if entry.start_date.is_empty() && entry.end_date.is_empty() {
                if let Some(caps) = DATE_RANGE.captures(line) {
                    entry.start_date = normalize_date(&caps[1]);
                    entry.end_date = normalize_date(&caps[2]);
                } else if let Some(date) = DATE_TOKEN.find(line) {
                    if !GPA.is_match(line) {
                        entry.end_date = normalize_date(date.as_str());
                    }
                }
            }

            if entry.location.is_empty() {
                let without_dates = DATE_RANGE.replace_all(line, "");
                let without_dates = DATE_TOKEN.replace_all(&without_dates, "");
                let candidate = without_dates.trim_end_matches(|c: char| {
                    c.is_whitespace() || "-–—|,()".contains(c)
                });
                if let Some(caps) = TRAILING_LOCATION.captures(candidate) {
                    entry.location = caps[1].to_string();
                } else if !consumed && CITY_STATE.is_match(candidate.trim()) {
                    entry.location = candidate.trim().to_string();
                    consumed = true;
                }
            }

            if let Some(caps) = GPA.captures(line) {
                gpa = Some(caps[1].split_whitespace().collect());
                let rest = GPA.replace(line, "");
                consumed |= rest.trim_matches(|c: char| !c.is_alphanumeric()).is_empty();
            }

            if !consumed && !is_date_line(line) {
                description.push(line);
            }
        }

        if entry.institution.is_empty() {
            if let Some(idx) = degree_line {
                let fallback = lines.iter().skip(idx + 1).find(|l| {
                    l.chars().next().is_some_and(char::is_uppercase)
                        && !is_date_line(l)
                        && find_degree(l).is_none()
                        && !GPA.is_match(l)
                });
                if let Some(line) = fallback {
                    entry.institution = trim_institution(line);
                    description.retain(|d| d != line);
                }
            }
        }

        let mut html = render_html(&clean_description(&description.join("\n")));
        if let Some(gpa) = gpa {
            html.push_str(&format!("<p>GPA: {gpa}</p>"));
        }
        entry.description = html;
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(fragment: &str) -> EducationEntry {
        let dict = Dictionaries::default();
        EducationExtractor::new(&dict).parse_entry(fragment, "edu-1".to_string())
    }

    #[test]
    fn test_institution_first_block() {
        let entry = parse("Stanford University\nB.S. Computer Science\n2014 - 2018\nGPA: 3.8/4.0");
        assert_eq!(
            entry,
            EducationEntry {
                id: "edu-1".to_string(),
                degree: "Bachelor of Science in Computer Science".to_string(),
                institution: "Stanford University".to_string(),
                location: String::new(),
                start_date: "2014-01".to_string(),
                end_date: "2018-01".to_string(),
                description: "<p>GPA: 3.8/4.0</p>".to_string(),
            }
        );
    }

    #[test]
    fn test_single_line_entry() {
        let entry = parse("Master of Science in Statistics, University of Washington, Seattle, WA, 2020");
        assert_eq!(entry.degree, "Master of Science in Statistics");
        assert_eq!(entry.institution, "University of Washington");
        assert_eq!(entry.location, "Seattle, WA");
        assert_eq!(entry.end_date, "2020-01");
        assert_eq!(entry.start_date, "");
    }

    #[test]
    fn test_degree_with_month_date() {
        let entry = parse("MBA, Wharton School, May 2016");
        assert_eq!(entry.degree, "Master of Business Administration");
        assert_eq!(entry.institution, "Wharton School");
        assert_eq!(entry.end_date, "2016-05");
    }

    #[test]
    fn test_institution_fallback_line() {
        let entry = parse("Ph.D. in Physics\nETH Zurich\n2015 - 2020\nThesis on quantum transport");
        assert_eq!(entry.degree, "Doctor of Philosophy in Physics");
        assert_eq!(entry.institution, "ETH Zurich");
        assert_eq!(entry.description, "<p>Thesis on quantum transport</p>");
    }

    #[test]
    fn test_find_degree_post_checks() {
        assert!(find_degree("Boston, MA").is_none());
        assert!(find_degree("BS Computer Science").is_some());
        assert!(find_degree("Advisor: A. Smith").is_none());
        assert_eq!(find_degree("B.S. in Math").unwrap().start(), 0);
    }

    #[test]
    fn test_extract_filters_empty_entries() {
        let dict = Dictionaries::default();
        let mut ids = EntryIds::default();
        let entries = EducationExtractor::new(&dict).extract(
            "B.S. Computer Science\nStanford University\n2014 - 2018\n\nM.S. Statistics\nUniversity of Washington\n2018 - 2020",
            &mut ids,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "edu-1");
        assert_eq!(entries[1].id, "edu-2");
        assert_eq!(entries[1].institution, "University of Washington");
    }
}
