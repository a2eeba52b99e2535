//! Merges a refined partial document into the heuristic one.
//!
//! Only non-empty refined fields replace heuristic values. Entries are
//! matched by id; refined entries with an unknown or empty id are appended
//! under a fresh id. Refined values go through the same normalizers as the
//! heuristic ones.

use crate::extraction::keywords::Dictionaries;
use crate::models::{EducationEntry, PersonalInfo, Project, ResumeDocument, WorkExperienceEntry};
use crate::normalize::{
    canonicalize_degree, clean_description, is_ongoing, normalize_date, normalize_skills,
    render_html,
};

fn take(target: &mut String, refined: &str) {
    let refined = refined.trim();
    if !refined.is_empty() {
        *target = refined.to_string();
    }
}

fn take_date(target: &mut String, refined: &str) {
    take(target, &normalize_date(refined));
}

fn take_description(target: &mut String, refined: &str) {
    if refined.trim_start().starts_with('<') {
        take(target, refined);
    } else {
        take(target, &render_html(&clean_description(refined)));
    }
}

/// Next "prefix-N" after the highest N already in use.
fn fresh_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let next = existing
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    format!("{prefix}-{next}")
}

// ────────────────────────────────────────────────────────────────────────────
// Entry lists, matched by id
// ────────────────────────────────────────────────────────────────────────────

trait Entry: Default {
    const ID_PREFIX: &'static str;
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn absorb(&mut self, refined: &Self);
}

impl Entry for WorkExperienceEntry {
    const ID_PREFIX: &'static str = "exp";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn absorb(&mut self, refined: &Self) {
        take(&mut self.position, &refined.position);
        take(&mut self.company, &refined.company);
        take(&mut self.location, &refined.location);
        take_date(&mut self.start_date, &refined.start_date);
        take_date(&mut self.end_date, &refined.end_date);
        take_description(&mut self.description, &refined.description);
        self.current = is_ongoing(&self.end_date);
    }
}

impl Entry for EducationEntry {
    const ID_PREFIX: &'static str = "edu";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn absorb(&mut self, refined: &Self) {
        take(&mut self.degree, &canonicalize_degree(&refined.degree));
        take(&mut self.institution, &refined.institution);
        take(&mut self.location, &refined.location);
        take_date(&mut self.start_date, &refined.start_date);
        take_date(&mut self.end_date, &refined.end_date);
        take_description(&mut self.description, &refined.description);
    }
}

impl Entry for Project {
    const ID_PREFIX: &'static str = "proj";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn absorb(&mut self, refined: &Self) {
        take(&mut self.name, &refined.name);
        take_description(&mut self.description, &refined.description);
        take(&mut self.technologies, &refined.technologies);
        take(&mut self.link, &refined.link);
    }
}

fn merge_entries<E: Entry>(base: &mut Vec<E>, refined: &[E]) {
    for candidate in refined {
        let known = if candidate.id().is_empty() {
            None
        } else {
            base.iter_mut().find(|e| e.id() == candidate.id())
        };
        match known {
            Some(entry) => entry.absorb(candidate),
            None => {
                let mut entry = E::default();
                entry.absorb(candidate);
                entry.set_id(fresh_id(E::ID_PREFIX, base.iter().map(|e| e.id())));
                base.push(entry);
            }
        }
    }
}

fn merge_personal(base: &mut PersonalInfo, refined: &PersonalInfo) {
    take(&mut base.name, &refined.name);
    take(&mut base.position, &refined.position);
    take(&mut base.email, &refined.email);
    take(&mut base.phone, &refined.phone);
    take(&mut base.location, &refined.location);
    take(&mut base.summary, &refined.summary);
    if !refined.links.is_empty() {
        let mut links: Vec<String> = Vec::new();
        for link in refined.links.iter().chain(base.links.iter()) {
            let link = link.trim();
            if !link.is_empty() && !links.iter().any(|l| l.eq_ignore_ascii_case(link)) {
                links.push(link.to_string());
            }
        }
        base.links = links;
    }
}

pub fn merge_document(mut base: ResumeDocument, refined: &ResumeDocument, dict: &Dictionaries) -> ResumeDocument {
    merge_personal(&mut base.personal_info, &refined.personal_info);
    merge_entries(&mut base.work_experience, &refined.work_experience);
    merge_entries(&mut base.education, &refined.education);
    merge_entries(&mut base.projects, &refined.projects);
    if !refined.skills.is_empty() {
        base.skills = normalize_skills(&refined.skills, dict);
    }
    base
}
