//! Word limits for refined text.
//!
//! Refined summaries and project descriptions are flattened to one paragraph
//! and cut at a word limit; refined experience descriptions become bullet
//! lines and keep whole bullets only. HTML descriptions pass through.

use crate::extraction::patterns::strip_bullet;
use crate::models::ResumeDocument;
use crate::normalize::description::BULLET;

pub const SUMMARY_WORD_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletBudget {
    pub bullets: usize,
    pub words_per_bullet: usize,
}

impl BulletBudget {
    pub fn word_limit(&self) -> usize {
        self.bullets * self.words_per_bullet
    }
}

/// Fewer, shorter bullets as the number of jobs grows.
pub fn experience_budget(total_entries: usize) -> BulletBudget {
    match total_entries {
        n if n >= 5 => BulletBudget {
            bullets: 2,
            words_per_bullet: 15,
        },
        n if n >= 3 => BulletBudget {
            bullets: 3,
            words_per_bullet: 18,
        },
        _ => BulletBudget {
            bullets: 4,
            words_per_bullet: 20,
        },
    }
}

pub fn project_word_limit(total_projects: usize) -> usize {
    match total_projects {
        n if n >= 5 => 30,
        n if n >= 3 => 45,
        _ => 60,
    }
}

fn is_html(text: &str) -> bool {
    text.trim_start().starts_with('<')
}

/// One paragraph, list glyphs removed.
pub fn flatten_paragraph(text: &str) -> String {
    text.lines()
        .map(strip_bullet)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cuts a paragraph to `limit` words, closing it with a period when cut.
pub fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return words.join(" ");
    }
    let mut out = words[..limit].join(" ");
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Bullet lines, keeping whole bullets while the budget allows.
pub fn limit_bullets(text: &str, budget: BulletBudget) -> String {
    let limit = budget.word_limit();
    let mut used = 0;
    let mut kept = Vec::new();
    for bullet in text.lines().map(strip_bullet).filter(|l| !l.is_empty()) {
        let words = bullet.split_whitespace().count();
        if kept.len() == budget.bullets || used + words > limit {
            break;
        }
        used += words;
        kept.push(format!("{BULLET}{bullet}"));
    }
    kept.join("\n")
}

fn limit_paragraph(text: &mut String, limit: usize) {
    if !text.is_empty() && !is_html(text) {
        *text = truncate_words(&flatten_paragraph(text), limit);
    }
}

/// Applies every limit in place.
pub fn apply_word_limits(doc: &mut ResumeDocument) {
    limit_paragraph(&mut doc.personal_info.summary, SUMMARY_WORD_LIMIT);

    let budget = experience_budget(doc.work_experience.len());
    for entry in doc.work_experience.iter_mut() {
        if !entry.description.is_empty() && !is_html(&entry.description) {
            entry.description = limit_bullets(&entry.description, budget);
        }
    }

    let project_limit = project_word_limit(doc.projects.len());
    for project in doc.projects.iter_mut() {
        limit_paragraph(&mut project.description, project_limit);
    }
}
