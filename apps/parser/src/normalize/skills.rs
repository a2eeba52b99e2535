//! Skill token standardization, filtering, ordering and capping.

use std::collections::HashSet;

use crate::extraction::keywords::Dictionaries;

pub const MAX_SKILLS: usize = 16;

const MAX_SKILL_WORDS: usize = 4;

/// Strips list glyphs and trailing punctuation from a raw token.
fn clean_token(token: &str) -> &str {
    token
        .trim()
        .trim_start_matches(|c: char| c.is_whitespace() || "•·*-–—▪◦●‣".contains(c))
        .trim_end_matches(|c: char| c.is_whitespace() || ".,;:!?".contains(c))
        .trim()
}

/// Known terms always pass; otherwise drop stop words, filler verbs,
/// tokens without letters or shorter than two characters, and phrases.
pub fn is_skill_candidate(token: &str, dict: &Dictionaries) -> bool {
    if dict.canonical_term(token).is_some() {
        return true;
    }
    token.chars().count() >= 2
        && token.chars().any(char::is_alphabetic)
        && !dict.is_non_skill(token)
        && token.split_whitespace().count() <= MAX_SKILL_WORDS
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case letters after the first character, e.g. "GraphQL", "iOS".
fn has_inner_uppercase(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase)
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn standardize_word(word: &str) -> String {
    if is_all_caps(word) {
        if word.chars().count() <= 5 {
            word.to_string()
        } else {
            capitalize(word)
        }
    } else if has_inner_uppercase(word) {
        word.to_string()
    } else {
        capitalize(word)
    }
}

/// Canonical spelling of one skill token.
pub fn standardize_skill(token: &str, dict: &Dictionaries) -> String {
    let token = clean_token(token);
    if let Some(canonical) = dict.canonical_term(token) {
        return canonical.to_string();
    }

    let words: Vec<&str> = token.split_whitespace().collect();
    if words.len() <= 1 {
        return standardize_word(token);
    }

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && dict.is_connector(word) {
                word.to_lowercase()
            } else if has_inner_uppercase(word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filters, standardizes, dedupes (first form wins), orders by category and
/// caps the list at [`MAX_SKILLS`].
pub fn normalize_skills<I, S>(tokens: I, dict: &Dictionaries) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut skills: Vec<String> = tokens
        .into_iter()
        .filter_map(|raw| {
            let token = clean_token(raw.as_ref());
            if !is_skill_candidate(token, dict) {
                return None;
            }
            let skill = standardize_skill(token, dict);
            seen.insert(skill.to_lowercase()).then_some(skill)
        })
        .collect();

    skills.sort_by_key(|skill| dict.skill_category(skill));
    skills.truncate(MAX_SKILLS);
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dict() -> Dictionaries {
        Dictionaries::default()
    }

    #[test]
    fn test_alias_mapping() {
        let d = dict();
        assert_eq!(standardize_skill("nodejs", &d), "Node.js");
        assert_eq!(standardize_skill("node-js", &d), "Node.js");
        assert_eq!(standardize_skill("node.js", &d), "Node.js");
        assert_eq!(standardize_skill("postgres", &d), "PostgreSQL");
    }

    #[test]
    fn test_unknown_multi_word_title_cased() {
        let d = dict();
        assert_eq!(standardize_skill("event sourcing", &d), "Event Sourcing");
        assert_eq!(
            standardize_skill("design of experiments", &d),
            "Design of Experiments"
        );
        assert_eq!(standardize_skill("AWS lambda", &d), "AWS Lambda");
    }

    #[test]
    fn test_unknown_single_words() {
        let d = dict();
        assert_eq!(standardize_skill("kafka", &d), "Kafka");
        assert_eq!(standardize_skill("GRPC", &d), "GRPC");
        assert_eq!(standardize_skill("KUBEFLOW", &d), "Kubeflow");
        assert_eq!(standardize_skill("gRPC", &d), "gRPC");
    }

    #[test]
    fn test_case_insensitive_dedupe_first_wins() {
        let d = dict();
        let skills = normalize_skills(["JavaScript", "javascript", "JS"], &d);
        assert_eq!(skills, vec!["JavaScript"]);
    }

    #[test]
    fn test_non_skills_filtered() {
        let d = dict();
        let skills = normalize_skills(["and", "Using", "x", "123", "Rust", "C"], &d);
        assert_eq!(skills, vec!["Rust", "C"]);
    }

    #[test]
    fn test_sorted_by_category_and_capped() {
        let d = dict();
        let skills = normalize_skills(
            [
                "Leadership", "Jest", "AWS", "PostgreSQL", "React", "Python", "Kafka", "GraphQL",
                "Pandas",
            ],
            &d,
        );
        assert_eq!(
            skills,
            vec![
                "Python", "React", "PostgreSQL", "AWS", "GraphQL", "Pandas", "Jest", "Leadership",
                "Kafka"
            ]
        );

        let many: Vec<String> = (0..30).map(|i| format!("tool{i}")).collect();
        assert_eq!(normalize_skills(&many, &d).len(), MAX_SKILLS);
    }

    #[test]
    fn test_idempotent() {
        let d = dict();
        let once = normalize_skills(
            ["nodejs", "machine learning", "GRPC", "event sourcing", "go", "Rust"],
            &d,
        );
        assert_eq!(normalize_skills(&once, &d), once);
    }
}
