//! Splits a person's name from a job title fused into the same string, e.g.
//! "Jane Doe Fullstack Developer" or "JOHN SMITH | Data Engineer".

use crate::extraction::keywords::Dictionaries;

const SEPARATORS: &[&str] = &["\n", " | ", " - ", " – ", " — ", "//", " –", " —"];

const MAX_NAME_TOKENS: usize = 3;

/// Shortest keyword length considered when looking for a keyword glued to
/// other text.
const MIN_EMBEDDED_KEYWORD: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePosition {
    pub name: String,
    pub position: String,
}

impl NamePosition {
    fn new(name: &str, position: &str) -> Self {
        Self {
            name: trim_separators(name).to_string(),
            position: trim_separators(position).to_string(),
        }
    }
}

fn trim_separators(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || ",|-–—/:".contains(c))
}

fn is_punctuation_token(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

fn letters(token: &str) -> impl Iterator<Item = char> + '_ {
    token.chars().filter(|c| c.is_alphabetic())
}

fn is_all_lowercase(token: &str) -> bool {
    letters(token).next().is_some() && letters(token).all(char::is_lowercase)
}

fn is_all_caps(token: &str) -> bool {
    letters(token).count() >= 2 && letters(token).all(char::is_uppercase)
}

fn is_mixed_case(token: &str) -> bool {
    letters(token).skip(1).any(char::is_uppercase) && letters(token).any(char::is_lowercase)
}

pub struct Disambiguator<'a> {
    dict: &'a Dictionaries,
}

impl<'a> Disambiguator<'a> {
    pub fn new(dict: &'a Dictionaries) -> Self {
        Self { dict }
    }

    /// Name and position from a single header string. Passes are tried in
    /// order: explicit separator, capitalization change, keyword membership.
    pub fn split(&self, raw: &str) -> NamePosition {
        let raw = raw.trim();
        if raw.is_empty() {
            return NamePosition::default();
        }
        self.split_on_separator(raw)
            .or_else(|| self.split_on_capitalization(raw))
            .unwrap_or_else(|| self.split_on_keywords(raw))
    }

    fn has_position_keyword(&self, text: &str) -> bool {
        text.split_whitespace()
            .flat_map(|t| t.split('/'))
            .any(|t| self.dict.is_position_keyword(t))
    }

    fn split_on_separator(&self, raw: &str) -> Option<NamePosition> {
        SEPARATORS.iter().find_map(|sep| {
            let (left, right) = raw.split_once(sep)?;
            let name = trim_separators(left);
            if name.is_empty() || !self.has_position_keyword(right) {
                return None;
            }
            Some(NamePosition::new(name, right))
        })
    }

    fn split_on_capitalization(&self, raw: &str) -> Option<NamePosition> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let cut = tokens.iter().enumerate().skip(1).find_map(|(i, token)| {
            let keyword = self.dict.is_position_keyword(token);
            let lowercase_keyword = keyword && is_all_lowercase(token);
            let technical_keyword = keyword && is_mixed_case(token);
            let acronym = i > 1
                && is_all_caps(token)
                && tokens[..i].iter().any(|t| letters(t).any(char::is_lowercase));
            (lowercase_keyword || technical_keyword || acronym).then_some(i)
        })?;
        Some(NamePosition::new(
            &tokens[..cut].join(" "),
            &tokens[cut..].join(" "),
        ))
    }

    fn split_on_keywords(&self, raw: &str) -> NamePosition {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        if let Some(cut) = (1..tokens.len()).find(|&i| self.dict.is_position_keyword(tokens[i])) {
            return NamePosition::new(&tokens[..cut].join(" "), &tokens[cut..].join(" "));
        }

        if tokens.len() <= MAX_NAME_TOKENS {
            return NamePosition::new(raw, "");
        }

        let embedded = (1..tokens.len()).find(|&i| {
            let lower = tokens[i].to_lowercase();
            self.dict
                .job_titles
                .iter()
                .chain(self.dict.position_modifiers.iter())
                .any(|k| k.len() >= MIN_EMBEDDED_KEYWORD && lower.contains(k))
        });
        if let Some(cut) = embedded {
            return NamePosition::new(&tokens[..cut].join(" "), &tokens[cut..].join(" "));
        }

        let mut name_tokens: Vec<&str> = tokens.into_iter().take(MAX_NAME_TOKENS).collect();
        while name_tokens.last().is_some_and(|t| is_punctuation_token(t)) {
            name_tokens.pop();
        }
        NamePosition::new(&name_tokens.join(" "), "")
    }
}

/// Combines an existing position with a newly extracted one, joining them
/// with " | " unless one already covers the other (case-insensitive).
pub fn merge_position(existing: &str, extracted: &str) -> String {
    let existing = existing.trim();
    let extracted = extracted.trim();
    if extracted.is_empty() {
        return existing.to_string();
    }
    if existing.is_empty() {
        return extracted.to_string();
    }
    let (a, b) = (existing.to_lowercase(), extracted.to_lowercase());
    if a == b || a.contains(&b) {
        existing.to_string()
    } else if b.contains(&a) {
        extracted.to_string()
    } else {
        format!("{existing} | {extracted}")
    }
}
