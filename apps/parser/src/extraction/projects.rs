//! Project entries: name, description, technologies and link.

use std::collections::HashSet;

use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::{strip_bullet, GITHUB, TECH_LABEL, URL};
use crate::extraction::segmenter::EntrySegmenter;
use crate::models::{EntryIds, Project, SectionType};
use crate::normalize::{clean_description, render_html, standardize_skill};

const NAME_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", ": ", " ("];
const MAX_NAME_WORDS: usize = 8;
const MAX_LEADING_PHRASE_WORDS: usize = 6;

fn clean_link(raw: &str) -> String {
    raw.trim_end_matches(['.', ',', ';', ')']).to_string()
}

fn find_link(text: &str) -> Option<String> {
    URL.find(text)
        .or_else(|| GITHUB.find(text))
        .map(|m| clean_link(m.as_str()))
}

fn strip_links(line: &str) -> String {
    let out = URL.replace_all(line, " ");
    let out = GITHUB.replace_all(&out, " ");
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-line text after the name: "TaskFlow | React, Node.js" or
/// "TaskFlow (React, Node.js)".
fn inline_technologies(title: &str) -> Option<&str> {
    if let Some((_, rest)) = title.split_once(" | ") {
        return Some(rest);
    }
    let open = title.find(" (")?;
    let close = title.rfind(')')?;
    (close > open).then(|| &title[open + 2..close])
}

/// Capitalized words from the start of `line`.
fn leading_phrase(line: &str) -> String {
    line.split_whitespace()
        .take_while(|w| {
            w.chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
        })
        .take(MAX_LEADING_PHRASE_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ProjectExtractor<'a> {
    dict: &'a Dictionaries,
}

impl<'a> ProjectExtractor<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    pub fn extract(&self, section_text: &str, ids: &mut EntryIds) -> Vec<Project> {
        EntrySegmenter::new(self.dict)
            .segment(SectionType::Projects, section_text)
            .iter()
            .map(|fragment| self.parse_entry(fragment, ids.next_project()))
            .filter(|project| !project.name.is_empty() || !project.description.is_empty())
            .collect()
    }

    pub fn parse_entry(&self, fragment: &str, id: String) -> Project {
        let lines: Vec<&str> = fragment
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(title) = lines.first().map(|l| strip_bullet(l)) else {
            return Project {
                id,
                ..Default::default()
            };
        };

        let labeled = TECH_LABEL
            .captures(fragment)
            .map(|caps| caps[1].trim().to_string());
        let technologies = labeled
            .as_deref()
            .or_else(|| inline_technologies(title))
            .map(|raw| self.join_technologies(raw))
            .unwrap_or_default();

        let body: Vec<String> = lines[1..]
            .iter()
            .filter(|l| !TECH_LABEL.is_match(l))
            .map(|l| strip_links(l))
            .filter(|l| !l.is_empty())
            .collect();

        Project {
            id,
            name: self.project_name(title),
            description: render_html(&clean_description(&body.join("\n"))),
            technologies,
            link: find_link(fragment).unwrap_or_default(),
        }
    }

    fn project_name(&self, title: &str) -> String {
        let title = strip_links(title);
        let cut = NAME_SEPARATORS
            .iter()
            .filter_map(|sep| title.find(sep))
            .min()
            .unwrap_or(title.len());
        let name = title[..cut].trim().trim_end_matches([':', ',', '-']).trim();
        if name.split_whitespace().count() <= MAX_NAME_WORDS {
            name.to_string()
        } else {
            leading_phrase(name)
        }
    }

    /// Standardized, deduplicated, comma-joined technology list.
    fn join_technologies(&self, raw: &str) -> String {
        let mut seen = HashSet::new();
        raw.split([',', ';', '|', '•'])
            .flat_map(|part| part.split(" and "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| standardize_skill(t, self.dict))
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
