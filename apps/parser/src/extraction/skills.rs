//! Skills section tokenizer.

use crate::extraction::keywords::Dictionaries;
use crate::extraction::patterns::strip_bullet;
use crate::normalize::normalize_skills;

const TOKEN_SEPARATORS: &[char] = &[',', ';', '|', '•', '·', '(', ')', '\t'];
const MAX_LABEL_WORDS: usize = 3;

/// Drops a short "Languages:" style category label.
fn strip_label(line: &str) -> &str {
    match line.split_once(':') {
        Some((label, rest))
            if !label.contains(',') && label.split_whitespace().count() <= MAX_LABEL_WORDS =>
        {
            rest
        }
        _ => line,
    }
}

/// Raw skill tokens of a skills section, in reading order.
pub fn tokenize(section_text: &str) -> Vec<&str> {
    section_text
        .lines()
        .map(strip_bullet)
        .map(strip_label)
        .flat_map(|line| line.split(TOKEN_SEPARATORS))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

pub struct SkillsExtractor<'a> {
    dict: &'a Dictionaries,
}

impl<'a> SkillsExtractor<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    pub fn extract(&self, section_text: &str) -> Vec<String> {
        normalize_skills(tokenize(section_text), self.dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_labels_and_bullets() {
        let text = "Languages: Python, Rust\n• Frameworks: React | Django\nAWS (EC2; S3)";
        assert_eq!(
            tokenize(text),
            vec!["Python", "Rust", "React", "Django", "AWS", "EC2", "S3"]
        );
    }

    #[test]
    fn test_extract_orders_and_dedupes() {
        let dict = Dictionaries::default();
        let skills = SkillsExtractor::new(&dict).extract("AWS, react, Python, python, and");
        assert_eq!(skills, vec!["Python", "React", "AWS"]);
    }

    #[test]
    fn test_empty_section() {
        let dict = Dictionaries::default();
        assert!(SkillsExtractor::new(&dict).extract("").is_empty());
    }
}
