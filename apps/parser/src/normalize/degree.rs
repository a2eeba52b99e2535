/// Abbreviations keyed by their lowercase letters with dots and spaces removed.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("bs", "Bachelor of Science"),
    ("bsc", "Bachelor of Science"),
    ("ba", "Bachelor of Arts"),
    ("be", "Bachelor of Engineering"),
    ("beng", "Bachelor of Engineering"),
    ("btech", "Bachelor of Technology"),
    ("bba", "Bachelor of Business Administration"),
    ("bfa", "Bachelor of Fine Arts"),
    ("ms", "Master of Science"),
    ("msc", "Master of Science"),
    ("ma", "Master of Arts"),
    ("me", "Master of Engineering"),
    ("meng", "Master of Engineering"),
    ("mtech", "Master of Technology"),
    ("mba", "Master of Business Administration"),
    ("mfa", "Master of Fine Arts"),
    ("phd", "Doctor of Philosophy"),
    ("aa", "Associate of Arts"),
    ("as", "Associate of Science"),
];

const LEVELS: &[(&str, &str)] = &[
    ("bachelor", "Bachelor"),
    ("master", "Master"),
    ("associate", "Associate"),
    ("doctor", "Doctor"),
];

const FIELDS: &[(&str, &str)] = &[
    ("business administration", "Business Administration"),
    ("fine arts", "Fine Arts"),
    ("science", "Science"),
    ("arts", "Arts"),
    ("engineering", "Engineering"),
    ("technology", "Technology"),
    ("philosophy", "Philosophy"),
];

fn abbreviation_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn lookup_abbreviation(key: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, full)| *full)
}

/// Splits "<head> in <major>" at the first " in ".
fn split_major(value: &str) -> (&str, Option<&str>) {
    // Matched on the original bytes; " in " is ASCII so `idx` is a char boundary.
    match value
        .as_bytes()
        .windows(4)
        .position(|w| w.eq_ignore_ascii_case(b" in "))
    {
        Some(idx) => {
            let major = value[idx + 4..].trim();
            (value[..idx].trim(), (!major.is_empty()).then_some(major))
        }
        None => (value, None),
    }
}

fn with_major(base: &str, major: Option<&str>) -> String {
    match major {
        Some(major) => format!("{base} in {major}"),
        None => base.to_string(),
    }
}

/// "B.S. Computer Science", "MBA", "Ph.D. in Physics".
fn canonicalize_abbreviation(value: &str) -> Option<String> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let first = tokens.first()?;

    let (full, consumed) = if let Some(full) = lookup_abbreviation(&abbreviation_key(first)) {
        (full, 1)
    } else if tokens.len() >= 2 {
        let joined = format!("{}{}", first, tokens[1]);
        (lookup_abbreviation(&abbreviation_key(&joined))?, 2)
    } else {
        return None;
    };

    let rest = tokens[consumed..].join(" ");
    let rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    let major = rest
        .strip_prefix("in ")
        .or_else(|| rest.strip_prefix("In "))
        .unwrap_or(rest)
        .trim();
    Some(with_major(full, (!major.is_empty()).then_some(major)))
}

/// "Bachelor's of Science", "Master of Business Administration".
fn canonicalize_spelled(value: &str) -> Option<String> {
    let (head, major) = split_major(value);
    let head_lower = head.to_lowercase().replace(['’', '\''], "");

    let (level_key, level) = LEVELS
        .iter()
        .find(|(key, _)| head_lower.starts_with(key))?;

    let remainder = head_lower[level_key.len()..]
        .trim_start_matches(|c: char| c == 's' || c == 'a' || c == 't' || c == 'e')
        .replace("degree", "")
        .replace(" of ", " ")
        .replace(['.', ','], " ");
    let remainder = remainder
        .split_whitespace()
        .filter(|w| *w != "of")
        .collect::<Vec<_>>()
        .join(" ");

    let field = FIELDS
        .iter()
        .find(|(key, _)| *key == remainder)
        .map(|(_, field)| *field)?;

    if *level == "Doctor" && field != "Philosophy" {
        return None;
    }
    Some(with_major(&format!("{level} of {field}"), major))
}

/// Expands a recognizable degree to its full canonical name, keeping any
/// " in <Major>" suffix. Unrecognized text comes back trimmed but otherwise
/// unchanged.
pub fn canonicalize_degree(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }
    canonicalize_abbreviation(value)
        .or_else(|| canonicalize_spelled(value))
        .unwrap_or_else(|| value.to_string())
}
