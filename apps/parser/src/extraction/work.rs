//! Work experience entries.
//!
//! The first one to three header lines of an entry carry position, company,
//! dates and location in no fixed layout. Position and company come from a
//! ranked list of strategies; the description starts at the first bullet or
//! right after the header lines.

use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::{
    is_bullet_line, is_date_line, strip_bullet, AT_COMPANY, CITY_STATE, CORPORATE_SUFFIX,
    DATE_RANGE, DATE_TOKEN, POSITION_AT_COMPANY, TRAILING_LOCATION,
};
use crate::extraction::segmenter::EntrySegmenter;
use crate::extraction::strategy::{run_ranked, Strategy};
use crate::models::{EntryIds, SectionType, WorkExperienceEntry};
use crate::normalize::{clean_description, is_ongoing, normalize_date, render_html};

const MAX_HEADER_LINES: usize = 3;
const MAX_HEADER_CHARS: usize = 100;
const TITLE_WINDOW: usize = 6;
const SEGMENT_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", ", ", " · "];

type PositionCompany = (String, String);

fn trim_field(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || ",|-–—·:()".contains(c))
        .to_string()
}

fn split_segments(line: &str) -> Vec<String> {
    let mut parts = vec![line.to_string()];
    for sep in SEGMENT_SEPARATORS {
        parts = parts
            .iter()
            .flat_map(|p| p.split(sep).map(str::to_string).collect::<Vec<_>>())
            .collect();
    }
    parts
        .iter()
        .map(|p| trim_field(p))
        .filter(|p| !p.is_empty())
        .collect()
}

fn starts_uppercase(value: &str) -> bool {
    value
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// Cleaned header lines of one entry plus the dictionaries.
struct HeaderContext<'a> {
    lines: Vec<String>,
    dict: &'a Dictionaries,
}

impl HeaderContext<'_> {
    fn is_company(&self, value: &str) -> bool {
        CORPORATE_SUFFIX.is_match(value)
            || value
                .split_whitespace()
                .next()
                .is_some_and(|t| self.dict.is_big_company(t))
    }

    fn has_title(&self, value: &str) -> bool {
        self.dict.line_has_title(value, TITLE_WINDOW)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Position/company strategies, in rank order
// ────────────────────────────────────────────────────────────────────────────

/// "Senior Engineer at Acme".
fn position_at_company(ctx: &HeaderContext) -> Option<PositionCompany> {
    ctx.lines.iter().find_map(|line| {
        let caps = POSITION_AT_COMPANY.captures(line)?;
        let position = trim_field(&caps[1]);
        if !ctx.has_title(&position) {
            return None;
        }
        let company = split_segments(&caps[2]).into_iter().next()?;
        Some((position, company))
    })
}

/// "Senior Engineer | Acme Inc" or "Acme Inc - Senior Engineer".
fn separated_segments(ctx: &HeaderContext) -> Option<PositionCompany> {
    ctx.lines.iter().find_map(|line| {
        let segments = split_segments(line);
        if segments.len() < 2 {
            return None;
        }
        let title_idx = segments.iter().position(|s| ctx.has_title(s))?;
        let company = segments
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != title_idx)
            .map(|(_, s)| s)
            .find(|s| ctx.is_company(s))
            .or_else(|| {
                segments
                    .iter()
                    .enumerate()
                    .find(|(i, s)| *i != title_idx && starts_uppercase(s))
                    .map(|(_, s)| s)
            })?;
        Some((segments[title_idx].clone(), company.clone()))
    })
}

/// A title line, with the company from a suffix line, an "at/with/for"
/// phrase, or the next capitalized header line.
fn title_line(ctx: &HeaderContext) -> Option<PositionCompany> {
    let (idx, line) = ctx
        .lines
        .iter()
        .enumerate()
        .find(|(_, l)| ctx.has_title(l))?;

    if let Some(caps) = AT_COMPANY.captures(line) {
        let whole = caps.get(0)?;
        let position = trim_field(&line[..whole.start()]);
        if !position.is_empty() {
            return Some((position, trim_field(&caps[1])));
        }
    }

    let others = || {
        ctx.lines
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != idx)
            .map(|(_, l)| l)
    };
    let company = others()
        .find(|l| ctx.is_company(l))
        .or_else(|| others().find(|l| starts_uppercase(l)))
        .map(|l| trim_field(l))
        .unwrap_or_default();
    Some((trim_field(line), company))
}

/// A line with a corporate suffix or a well-known company name.
fn company_line(ctx: &HeaderContext) -> Option<PositionCompany> {
    let (idx, company) = ctx
        .lines
        .iter()
        .enumerate()
        .find(|(_, l)| ctx.is_company(l))?;
    let position = ctx
        .lines
        .iter()
        .enumerate()
        .find(|(i, l)| *i != idx && starts_uppercase(l))
        .map(|(_, l)| trim_field(l))
        .unwrap_or_default();
    Some((position, trim_field(company)))
}

/// Line one is the position, line two the company when capitalized.
fn first_lines(ctx: &HeaderContext) -> Option<PositionCompany> {
    let position = ctx.lines.first()?;
    let company = ctx
        .lines
        .get(1)
        .filter(|l| starts_uppercase(l))
        .map(|l| trim_field(l))
        .unwrap_or_default();
    Some((trim_field(position), company))
}

// ────────────────────────────────────────────────────────────────────────────
// Entry parsing
// ────────────────────────────────────────────────────────────────────────────

pub struct WorkExtractor<'a> {
    dict: &'a Dictionaries,
}

impl<'a> WorkExtractor<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    pub fn extract(&self, section_text: &str, ids: &mut EntryIds) -> Vec<WorkExperienceEntry> {
        EntrySegmenter::new(self.dict)
            .segment(SectionType::Experience, section_text)
            .iter()
            .map(|fragment| self.parse_entry(fragment, ids.next_work()))
            .filter(|entry| {
                !entry.position.is_empty() || !entry.company.is_empty() || !entry.description.is_empty()
            })
            .collect()
    }

    pub fn parse_entry(&self, fragment: &str, id: String) -> WorkExperienceEntry {
        let mut entry = WorkExperienceEntry {
            id,
            ..Default::default()
        };
        let raw_lines: Vec<&str> = fragment.lines().collect();
        let content: Vec<usize> = raw_lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, _)| i)
            .collect();

        let (mut header, desc_start) = Self::split_header(&raw_lines, &content);

        let range = header
            .iter()
            .find_map(|l| DATE_RANGE.captures(l))
            .or_else(|| DATE_RANGE.captures(fragment))
            .map(|caps| (caps[0].to_string(), caps[1].to_string(), caps[2].to_string()));
        match range {
            Some((matched, start, end)) => {
                entry.start_date = normalize_date(&start);
                entry.end_date = normalize_date(&end);
                for line in header.iter_mut() {
                    *line = line.replace(&matched, " ");
                }
            }
            None => {
                if let Some((idx, date)) = header
                    .iter()
                    .enumerate()
                    .find_map(|(i, l)| DATE_TOKEN.find(l).map(|m| (i, m.as_str().to_string())))
                {
                    entry.start_date = normalize_date(&date);
                    header[idx] = header[idx].replace(&date, " ");
                }
            }
        }
        entry.current = is_ongoing(&entry.end_date);

        let mut lines = Vec::new();
        for line in header {
            let mut line = trim_field(&line);
            if entry.location.is_empty() {
                let trailing = TRAILING_LOCATION
                    .captures(&line)
                    .map(|caps| (caps[1].to_string(), caps.get(0).map_or(0, |m| m.start())));
                if let Some((location, cut)) = trailing {
                    entry.location = location;
                    line = trim_field(&line[..cut]);
                } else if CITY_STATE.is_match(&line) && !CORPORATE_SUFFIX.is_match(&line) {
                    entry.location = line.clone();
                    continue;
                }
            }
            if !line.is_empty() {
                lines.push(line);
            }
        }

        let ctx = HeaderContext {
            lines,
            dict: self.dict,
        };
        let strategies: [Strategy<HeaderContext, PositionCompany>; 5] = [
            Strategy::new("position_at_company", position_at_company),
            Strategy::new("separated_segments", separated_segments),
            Strategy::new("title_line", title_line),
            Strategy::new("company_line", company_line),
            Strategy::new("first_lines", first_lines),
        ];
        if let Some((position, company)) = run_ranked("work.position_company", &strategies, &ctx) {
            entry.position = position;
            entry.company = company;
        }

        let body = raw_lines[desc_start..].join("\n");
        entry.description = render_html(&clean_description(&body));
        entry
    }

    /// Header lines (bullet glyphs removed) and the raw index where the
    /// description begins.
    fn split_header(raw_lines: &[&str], content: &[usize]) -> (Vec<String>, usize) {
        let mut header = Vec::new();
        let mut consumed = 0;

        if let Some(&first) = content.first() {
            if is_bullet_line(raw_lines[first]) {
                header.push(strip_bullet(raw_lines[first]).to_string());
                consumed = 1;
            }
        }

        if consumed == 0 {
            for &i in content.iter().take(MAX_HEADER_LINES) {
                let line = raw_lines[i].trim();
                if is_bullet_line(line)
                    || line.ends_with('.')
                    || line.chars().count() > MAX_HEADER_CHARS
                {
                    break;
                }
                header.push(line.to_string());
                consumed += 1;
            }
        }

        // A date line directly under the header still belongs to it.
        while let Some(&i) = content.get(consumed) {
            if !is_date_line(raw_lines[i]) {
                break;
            }
            header.push(raw_lines[i].trim().to_string());
            consumed += 1;
        }

        let desc_start = content.get(consumed).copied().unwrap_or(raw_lines.len());
        (header, desc_start)
    }
}
