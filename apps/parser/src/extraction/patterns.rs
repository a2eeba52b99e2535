//! Compiled regexes shared by the extractors and normalizers.
//!
//! Every pattern is a literal compiled once on first use.

use lazy_static::lazy_static;
use regex::Regex;

/// Month names and abbreviations, case-insensitive by the caller's flags.
pub const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

lazy_static! {
    // ── Contact ─────────────────────────────────────────────────────────────

    pub static ref EMAIL: Regex = Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)*\.[A-Za-z]{2,}").unwrap();

    /// Phone patterns in preference order: parenthesized area code, dashed,
    /// dotted, international.
    pub static ref PHONE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?:\+\d{1,3}[ .-]?)?\(\d{3}\)[ .-]?\d{3}[ .-]?\d{4}").unwrap(),
        Regex::new(r"(?:\+\d{1,3}[ .-]?)?\b\d{3}-\d{3}-\d{4}\b").unwrap(),
        Regex::new(r"(?:\+\d{1,3}[ .-]?)?\b\d{3}\.\d{3}\.\d{4}\b").unwrap(),
        Regex::new(r"\+\d{1,3}[ -]?\d{1,4}(?:[ -]?\d{2,4}){2,4}").unwrap(),
    ];

    pub static ref LINKEDIN: Regex =
        Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/[^\s,|<>()]+").unwrap();

    pub static ref GITHUB: Regex =
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[^\s,|<>()]+").unwrap();

    pub static ref URL: Regex = Regex::new(r"(?i)(?:https?://|www\.)[^\s,|<>()]+").unwrap();

    // ── Location ────────────────────────────────────────────────────────────

    pub static ref LOCATION_PHRASE: Regex =
        Regex::new(r"(?i)(?:located in|based in|location[ \t]*:)[ \t]*([^\n|•]+)").unwrap();

    /// A whole segment reading "City, ST" or "City, Country", optional ZIP.
    pub static ref CITY_STATE: Regex = Regex::new(
        r"^[A-Z][A-Za-z.'-]+(?:[ \t]+[A-Z][A-Za-z.'-]+){0,2},[ \t]*(?:[A-Z]{2}|[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){0,2})(?:[ \t]+\d{5})?$"
    ).unwrap();

    pub static ref STREET_INDICATOR: Regex = Regex::new(
        r"(?i)\b(?:street|st\.|avenue|ave\.?|road|rd\.|boulevard|blvd\.?|lane|ln\.|drive|dr\.|suite|apt\.?|apartment)(?:\s|,|$)"
    ).unwrap();

    pub static ref ZIP_CODE: Regex = Regex::new(r"\b\d{5}(?:-\d{4})?\b").unwrap();

    // ── Dates ───────────────────────────────────────────────────────────────

    /// A single date token: "Jan 2020", "01/2020", "2020-01" or "2020".
    pub static ref DATE_TOKEN: Regex = Regex::new(&format!(
        r"(?i)\b(?:{MONTH}\.?,?[ \t]+(?:19|20)\d{{2}}|(?:0?[1-9]|1[0-2])/(?:19|20)\d{{2}}|(?:19|20)\d{{2}}-(?:0[1-9]|1[0-2])\b|(?:19|20)\d{{2}})\b"
    )).unwrap();

    /// "<date> - <date>|Present|Current|Now"; groups 1 and 2 are the ends.
    pub static ref DATE_RANGE: Regex = Regex::new(&format!(
        r"(?i)\b({MONTH}\.?,?[ \t]+(?:19|20)\d{{2}}|(?:0?[1-9]|1[0-2])/(?:19|20)\d{{2}}|(?:19|20)\d{{2}}-(?:0[1-9]|1[0-2])|(?:19|20)\d{{2}})[ \t]*(?:[-–—]|\bto\b|\buntil\b)[ \t]*({MONTH}\.?,?[ \t]+(?:19|20)\d{{2}}|(?:0?[1-9]|1[0-2])/(?:19|20)\d{{2}}|(?:19|20)\d{{2}}-(?:0[1-9]|1[0-2])|(?:19|20)\d{{2}}|present|current|now)\b"
    )).unwrap();

    /// A line opening with a date (the work segmenter's first strategy).
    pub static ref DATE_LINE_START: Regex = Regex::new(&format!(
        r"(?i)^[ \t]*(?:{MONTH}\.?,?[ \t]+(?:19|20)\d{{2}}|(?:0?[1-9]|1[0-2])/(?:19|20)\d{{2}}|(?:19|20)\d{{2}}[ \t]*(?:[-–—]|to\b))"
    )).unwrap();

    pub static ref MONTH_YEAR: Regex =
        Regex::new(&format!(r"(?i)\b{MONTH}\.?[ \t]+(?:19|20)\d{{2}}\b")).unwrap();

    pub static ref YEAR_MONTH: Regex = Regex::new(r"\b(?:19|20)\d{2}-(?:0[1-9]|1[0-2])\b").unwrap();

    pub static ref PRESENT: Regex = Regex::new(r"(?i)\bpresent\b").unwrap();

    pub static ref TRAILING_MONTH: Regex =
        Regex::new(&format!(r"(?i)[ \t,]+{MONTH}\.?$")).unwrap();

    // ── Structure ───────────────────────────────────────────────────────────

    pub static ref BULLET_PREFIX: Regex =
        Regex::new(r"^[ \t]*(?:[•◦▪●‣·][ \t]*|[*\-–][ \t]+|\d{1,2}[.)][ \t]+)").unwrap();

    pub static ref SENIORITY_TITLE: Regex = Regex::new(
        r"(?i)\b(?:senior|junior|lead|principal|staff|engineer|developer|manager|analyst|intern|director|consultant|designer|architect)\b"
    ).unwrap();

    // ── Companies ───────────────────────────────────────────────────────────

    pub static ref CORPORATE_SUFFIX: Regex = Regex::new(
        r"\b(?:Inc|LLC|LLP|Ltd|Corp|Corporation|Company|GmbH|Group|Technologies|Solutions|Labs|Systems|Partners|Ventures)\b|\bCo\."
    ).unwrap();

    /// "at/with/for <Capitalized Name>"; group 1 is the company.
    pub static ref AT_COMPANY: Regex = Regex::new(
        r"(?:\b(?:[Aa]t|[Ww]ith|[Ff]or)|@)[ \t]+([A-Z][\w&.'-]*(?:[ \t]+(?:&[ \t]+)?[A-Z][\w&.'-]*)*)"
    ).unwrap();

    /// "<position> at <company>" on one line.
    pub static ref POSITION_AT_COMPANY: Regex = Regex::new(r"^(.+?)[ \t]+(?:at|@)[ \t]+(.+)$").unwrap();

    /// A trailing "- City, ST" on a header line; group 1 is the location.
    pub static ref TRAILING_LOCATION: Regex = Regex::new(
        r"[-–—|,][ \t]*([A-Z][A-Za-z.'-]+(?:[ \t]+[A-Z][A-Za-z.'-]+){0,2},[ \t]*[A-Z]{2})[ \t]*$"
    ).unwrap();

    // ── Education ───────────────────────────────────────────────────────────

    /// Degree mentions. Undotted two-letter forms need the post-check in
    /// the education extractor.
    pub static ref DEGREE: Regex = Regex::new(
        r"(?i:\b(?:bachelor|master|associate)(?:'s|’s|s)?\b|\bdoctor(?:ate)?\b|\bph\.?[ \t]?d\b\.?|\bm\.b\.a\.?|\bmba\b|\bhigh school diploma\b|\bdiploma\b)|\b[BMA]\.[ \t]?(?:Sc|S|A|E|Eng|Tech)\b\.?|\b(?:BSc|MSc|BS|BA|MS|MA|BE|BEng|MEng|BTech|MTech|BBA|BFA|MFA)\b"
    ).unwrap();

    /// Institution phrase; group 1 is the whole name.
    pub static ref INSTITUTION: Regex = Regex::new(
        r"((?:\b[A-Z][\w&.'-]*[ \t]+){0,4}\b(?:University|College|Institute|School|Academy|Polytechnic)\b(?:[ \t]+(?:of|for|at|de)[ \t]+[A-Z][\w&.'-]*(?:[ \t]+(?:of[ \t]+)?[A-Z][\w&.'-]*){0,3})?)"
    ).unwrap();

    /// Where a degree phrase ends on its line.
    pub static ref DEGREE_CUT: Regex =
        Regex::new(r"(?i)[,|(–—]|[ \t]-[ \t]|[ \t]from[ \t]|[ \t]at[ \t]|\byear\b|\bgpa\b").unwrap();

    pub static ref GPA: Regex = Regex::new(
        r"(?i)\bGPA[ \t]*:?[ \t]*(\d(?:\.\d{1,2})?(?:[ \t]*/[ \t]*\d(?:\.\d{1,2})?)?)"
    ).unwrap();

    // ── Projects ────────────────────────────────────────────────────────────

    /// "Technologies: ...", "Built with: ..."; group 1 is the list.
    pub static ref TECH_LABEL: Regex = Regex::new(
        r"(?im)^[ \t]*(?:[•*\-][ \t]*)?(?:technologies|tech stack|tech|built with|tools|stack)(?:[ \t]+used)?[ \t]*:[ \t]*(.+)$"
    ).unwrap();

    // ── Summary ─────────────────────────────────────────────────────────────

    /// A "Summary" label line, alone or followed by ":" and inline text
    /// (group 1).
    pub static ref SUMMARY_LABEL: Regex = Regex::new(
        r"(?im)^[ \t]*(?:professional[ \t]+|career[ \t]+)?(?:summary|objective|profile|about(?:[ \t]+me)?)(?:[ \t]*:[ \t]*(.*?))?[ \t]*$"
    ).unwrap();
}

pub fn is_bullet_line(line: &str) -> bool {
    BULLET_PREFIX.is_match(line)
}

/// The line with any leading bullet glyph or list number removed, trimmed.
pub fn strip_bullet(line: &str) -> &str {
    match BULLET_PREFIX.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// True for a line that is only a date or date range, optionally with a
/// location, e.g. "Jan 2020 - Present" or "2018".
pub fn is_date_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    let rest = DATE_RANGE.replace_all(trimmed, "");
    let rest = DATE_TOKEN.replace_all(&rest, "");
    let rest = rest.trim_matches(|c: char| c.is_whitespace() || "-–—|,()".contains(c));
    rest.len() < trimmed.len() && (rest.is_empty() || CITY_STATE.is_match(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_captures_both_ends() {
        let caps = DATE_RANGE.captures("Jan 2020 – Present").unwrap();
        assert_eq!(&caps[1], "Jan 2020");
        assert_eq!(&caps[2], "Present");

        let caps = DATE_RANGE.captures("Worked 2016-2019 remotely").unwrap();
        assert_eq!(&caps[1], "2016");
        assert_eq!(&caps[2], "2019");

        let caps = DATE_RANGE.captures("03/2017 to 12/2019").unwrap();
        assert_eq!(&caps[1], "03/2017");
        assert_eq!(&caps[2], "12/2019");
    }

    #[test]
    fn test_phone_patterns() {
        assert!(PHONE_PATTERNS[0].is_match("(555) 123-4567"));
        assert!(PHONE_PATTERNS[1].is_match("555-123-4567"));
        assert!(PHONE_PATTERNS[2].is_match("555.123.4567"));
        assert!(PHONE_PATTERNS[3].is_match("+44 20 7946 0958"));
        assert!(!PHONE_PATTERNS[1].is_match("2019-2020"));
    }

    #[test]
    fn test_email() {
        let m = EMAIL.find("Contact: jane.doe+cv@mail.example.com |").unwrap();
        assert_eq!(m.as_str(), "jane.doe+cv@mail.example.com");
    }

    #[test]
    fn test_bullet_prefix() {
        assert_eq!(strip_bullet("• Built things"), "Built things");
        assert_eq!(strip_bullet("- Shipped"), "Shipped");
        assert_eq!(strip_bullet("2. Led team"), "Led team");
        assert_eq!(strip_bullet("-webkit"), "-webkit");
        assert!(!is_bullet_line("3.5 years of Rust"));
    }

    #[test]
    fn test_is_date_line() {
        assert!(is_date_line("Jan 2020 - Present"));
        assert!(is_date_line("2014 - 2018"));
        assert!(is_date_line("May 2018"));
        assert!(is_date_line("2019 - 2021 | Austin, TX"));
        assert!(!is_date_line("Acme Inc"));
        assert!(!is_date_line("Built a system in 2019 for payments"));
    }

    #[test]
    fn test_degree_and_institution() {
        assert_eq!(DEGREE.find("B.S. Computer Science").unwrap().as_str(), "B.S.");
        assert_eq!(DEGREE.find("Bachelor's in Math").unwrap().as_str(), "Bachelor's");
        assert!(DEGREE.is_match("Ph.D. in Physics"));
        let caps = INSTITUTION.captures("Massachusetts Institute of Technology, 2019").unwrap();
        assert_eq!(caps[1].trim(), "Massachusetts Institute of Technology");
        let caps = INSTITUTION.captures("Stanford University").unwrap();
        assert_eq!(caps[1].trim(), "Stanford University");
    }

    #[test]
    fn test_city_state_whole_segment() {
        assert!(CITY_STATE.is_match("San Francisco, CA"));
        assert!(CITY_STATE.is_match("Berlin, Germany"));
        assert!(!CITY_STATE.is_match("Built APIs, Docker and more"));
    }
}
