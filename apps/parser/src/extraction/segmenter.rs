//! Entry segmentation shared by the work, education and project sections.
//!
//! Every candidate strategy marks boundary lines; the section is cut at those
//! lines and fragments of 20 characters or fewer are dropped. The strategy
//! with the most fragments wins, the earlier one on a tie. When no strategy
//! finds more than one entry the section is split on blank lines, and when
//! that finds nothing the whole section is one entry.
//!
//! A boundary line that is only part of an entry header (a date line under
//! a title and company, say) starts its entry up to two lines earlier when
//! those lines look like header lines ("header lift").

use tracing::debug;

use crate::extraction::education::find_degree;
use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::{
    is_bullet_line, is_date_line, strip_bullet, DATE_LINE_START, DATE_RANGE, INSTITUTION, TECH_LABEL,
    URL,
};
use crate::models::SectionType;

pub const MIN_FRAGMENT_CHARS: usize = 20;
const MAX_LIFT: usize = 2;
const MAX_HEADER_LINE_CHARS: usize = 80;
const MAX_TITLE_LINE_CHARS: usize = 100;
const MAX_PROJECT_TITLE_WORDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    DateLineStart,
    TitleLineStart,
    BulletEntryHeader,
    KnownCompany,
    DegreeLineStart,
    InstitutionLine,
    DateRangeLine,
    ProjectTitleLine,
    BlankLine,
}

use SplitStrategy::*;

const WORK_STRATEGIES: &[SplitStrategy] =
    &[DateLineStart, TitleLineStart, BulletEntryHeader, KnownCompany];
const EDUCATION_STRATEGIES: &[SplitStrategy] =
    &[DegreeLineStart, InstitutionLine, DateRangeLine, BlankLine];
const PROJECT_STRATEGIES: &[SplitStrategy] = &[ProjectTitleLine, BlankLine];

/// Non-blank, not a bullet, no closing period, short.
fn is_header_candidate(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !is_bullet_line(line)
        && !trimmed.ends_with('.')
        && trimmed.chars().count() <= MAX_HEADER_LINE_CHARS
}

fn starts_uppercase(line: &str) -> bool {
    line.trim()
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn is_institution_line(line: &str) -> bool {
    !is_bullet_line(line)
        && line.trim().chars().count() <= MAX_TITLE_LINE_CHARS
        && INSTITUTION.is_match(line)
}

fn is_degree_start(line: &str) -> bool {
    let stripped = strip_bullet(line);
    find_degree(stripped).is_some_and(|m| m.start() == 0)
}

fn is_title_line(line: &str, dict: &Dictionaries) -> bool {
    let trimmed = line.trim();
    !is_bullet_line(line)
        && trimmed.chars().count() < MAX_TITLE_LINE_CHARS
        && !trimmed.ends_with('.')
        && starts_uppercase(trimmed)
        && dict.line_has_title(trimmed, 4)
}

fn is_project_title(line: &str) -> bool {
    let trimmed = line.trim();
    is_header_candidate(line)
        && starts_uppercase(trimmed)
        && trimmed.split_whitespace().count() <= MAX_PROJECT_TITLE_WORDS
        && !TECH_LABEL.is_match(trimmed)
        && !is_date_line(trimmed)
        && !URL.find(trimmed).is_some_and(|m| m.start() == 0)
}

/// A line after which a new project may start.
fn ends_project_block(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || is_bullet_line(line)
        || trimmed.ends_with('.')
        || TECH_LABEL.is_match(trimmed)
        || URL.is_match(trimmed)
}

impl SplitStrategy {
    pub fn for_section(section: SectionType) -> &'static [SplitStrategy] {
        match section {
            SectionType::Experience => WORK_STRATEGIES,
            SectionType::Education => EDUCATION_STRATEGIES,
            SectionType::Projects => PROJECT_STRATEGIES,
            SectionType::Skills => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DateLineStart => "date_line_start",
            TitleLineStart => "title_line_start",
            BulletEntryHeader => "bullet_entry_header",
            KnownCompany => "known_company",
            DegreeLineStart => "degree_line_start",
            InstitutionLine => "institution_line",
            DateRangeLine => "date_range_line",
            ProjectTitleLine => "project_title_line",
            BlankLine => "blank_line",
        }
    }

    fn is_boundary(&self, lines: &[&str], idx: usize, dict: &Dictionaries) -> bool {
        let line = lines[idx];
        if line.trim().is_empty() {
            return false;
        }
        match self {
            DateLineStart => DATE_LINE_START.is_match(line),
            TitleLineStart => is_title_line(line, dict),
            BulletEntryHeader => {
                is_bullet_line(line) && {
                    let body = strip_bullet(line);
                    dict.line_has_title(body, 4) || DATE_RANGE.is_match(body)
                }
            }
            KnownCompany => {
                !is_bullet_line(line)
                    && line.split_whitespace().next().is_some_and(|t| dict.is_big_company(t))
            }
            DegreeLineStart => is_degree_start(line),
            InstitutionLine => is_institution_line(line),
            DateRangeLine => {
                !is_bullet_line(line) && (DATE_RANGE.is_match(line) || is_date_line(line))
            }
            ProjectTitleLine => {
                is_project_title(line) && (idx == 0 || ends_project_block(lines[idx - 1]))
            }
            BlankLine => idx > 0 && lines[idx - 1].trim().is_empty(),
        }
    }

    /// Whether a header-like line just above a boundary belongs to the entry
    /// the boundary starts.
    fn can_lift_over(&self, line: &str, dict: &Dictionaries) -> bool {
        if !is_header_candidate(line) {
            return false;
        }
        match self {
            DateLineStart => !is_date_line(line),
            TitleLineStart => {
                !is_date_line(line)
                    && !dict.line_has_title(line, 4)
                    && starts_uppercase(line)
                    && line.trim().chars().count() <= 60
            }
            KnownCompany => !is_date_line(line),
            DegreeLineStart => is_institution_line(line),
            InstitutionLine => is_degree_start(line),
            DateRangeLine => is_degree_start(line) || is_institution_line(line),
            BulletEntryHeader | ProjectTitleLine | BlankLine => false,
        }
    }

    /// Start line index of every entry this strategy finds.
    fn entry_starts(&self, lines: &[&str], dict: &Dictionaries) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut previous_boundary: Option<usize> = None;

        for idx in 0..lines.len() {
            if !self.is_boundary(lines, idx, dict) {
                continue;
            }
            let floor = previous_boundary.map(|b| b + 1).unwrap_or(0);
            let mut start = idx;
            while idx - start < MAX_LIFT
                && start > floor
                && self.can_lift_over(lines[start - 1], dict)
            {
                start -= 1;
            }
            starts.push(start);
            previous_boundary = Some(idx);
        }
        starts
    }

    /// Fragments longer than [`MIN_FRAGMENT_CHARS`], including any text
    /// ahead of the first boundary.
    pub fn fragments(&self, text: &str, dict: &Dictionaries) -> Vec<String> {
        let lines: Vec<&str> = text.lines().collect();
        let starts = self.entry_starts(&lines, dict);

        let mut cuts = Vec::with_capacity(starts.len() + 2);
        cuts.push(0);
        cuts.extend(starts.iter().copied().filter(|s| *s > 0));
        cuts.push(lines.len());

        cuts.windows(2)
            .map(|w| lines[w[0]..w[1]].join("\n").trim().to_string())
            .filter(|fragment| fragment.chars().count() > MIN_FRAGMENT_CHARS)
            .collect()
    }
}

pub struct EntrySegmenter<'a> {
    dict: &'a Dictionaries,
}

impl<'a> EntrySegmenter<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    /// Splits a section body into entry fragments.
    pub fn segment(&self, section: SectionType, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let mut best: Option<(SplitStrategy, Vec<String>)> = None;
        for strategy in SplitStrategy::for_section(section) {
            let fragments = strategy.fragments(text, self.dict);
            debug!(
                section = section.as_str(),
                strategy = strategy.name(),
                count = fragments.len(),
                "segmentation candidate"
            );
            if best.as_ref().map_or(true, |(_, b)| fragments.len() > b.len()) {
                best = Some((*strategy, fragments));
            }
        }

        if let Some((strategy, fragments)) = best {
            if fragments.len() > 1 {
                debug!(section = section.as_str(), strategy = strategy.name(), "segmentation winner");
                return fragments;
            }
        }

        let blocks = BlankLine.fragments(text, self.dict);
        if !blocks.is_empty() {
            debug!(section = section.as_str(), count = blocks.len(), "blank-line fallback");
            return blocks;
        }
        vec![trimmed.to_string()]
    }
}
