use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YEAR_MONTH: Regex = Regex::new(r"^(?:19|20)\d{2}-(?:0[1-9]|1[0-2])$").unwrap();
    static ref YEAR_ONLY: Regex = Regex::new(r"^(?:19|20)\d{2}$").unwrap();
    static ref MONTH_NAME_YEAR: Regex =
        Regex::new(r"(?i)^([a-z]{3})[a-z]*\.?,?\s+((?:19|20)\d{2})$").unwrap();
    static ref NUMERIC_MONTH_YEAR: Regex =
        Regex::new(r"^(0?[1-9]|1[0-2])\s*[/.-]\s*((?:19|20)\d{2})$").unwrap();
}

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Full-date layouts tried last, most common first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y/%m/%d",
];

pub fn is_ongoing(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "present" | "current" | "now"
    )
}

/// Canonicalizes a résumé date to `YYYY-MM`.
///
/// "Present"/"Current"/"Now" pass through, an empty string stays empty and
/// anything unparseable comes back unchanged (trimmed). Applying it twice
/// gives the same result as applying it once.
pub fn normalize_date(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() || is_ongoing(value) || YEAR_MONTH.is_match(value) {
        return value.to_string();
    }

    if YEAR_ONLY.is_match(value) {
        return format!("{value}-01");
    }

    if let Some(caps) = MONTH_NAME_YEAR.captures(value) {
        let prefix = caps[1].to_lowercase();
        if let Some(idx) = MONTH_PREFIXES.iter().position(|m| *m == prefix) {
            return format!("{}-{:02}", &caps[2], idx + 1);
        }
    }

    if let Some(caps) = NUMERIC_MONTH_YEAR.captures(value) {
        if let Ok(month) = caps[1].parse::<u32>() {
            return format!("{}-{:02}", &caps[2], month);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .map(|date| date.format("%Y-%m").to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_only() {
        assert_eq!(normalize_date("2023"), "2023-01");
    }

    #[test]
    fn test_month_year() {
        assert_eq!(normalize_date("Jan 2023"), "2023-01");
        assert_eq!(normalize_date("September 2019"), "2019-09");
        assert_eq!(normalize_date("Sept. 2019"), "2019-09");
        assert_eq!(normalize_date("dec, 2021"), "2021-12");
    }

    #[test]
    fn test_numeric_month_year() {
        assert_eq!(normalize_date("3/2017"), "2017-03");
        assert_eq!(normalize_date("12/2019"), "2019-12");
    }

    #[test]
    fn test_full_dates_via_formats() {
        assert_eq!(normalize_date("2020-01-15"), "2020-01");
        assert_eq!(normalize_date("07/04/2021"), "2021-07");
        assert_eq!(normalize_date("March 5, 2018"), "2018-03");
    }

    #[test]
    fn test_passthrough_values() {
        assert_eq!(normalize_date("Present"), "Present");
        assert_eq!(normalize_date("current"), "current");
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("   "), "");
        assert_eq!(normalize_date("2021-06"), "2021-06");
    }

    #[test]
    fn test_unparseable_returned_unchanged() {
        assert_eq!(normalize_date("Summer 2019"), "Summer 2019");
        assert_eq!(normalize_date("someday"), "someday");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "2023", "Jan 2023", "Present", "", "3/2017", "2020-01-15", "Summer 2019", "Now",
        ] {
            let once = normalize_date(raw);
            assert_eq!(normalize_date(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_is_ongoing() {
        assert!(is_ongoing("Present"));
        assert!(is_ongoing(" NOW "));
        assert!(!is_ongoing("2020-01"));
    }
}
