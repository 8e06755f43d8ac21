//! Header token normalization and education/credit recognition.

use std::sync::OnceLock;

use regex::Regex;

use salary_model::{Column, Education, EducationVocabulary};

/// Credits assumed for a bare `CAGS` header.
pub const CAGS_DEFAULT_CREDITS: u32 = 60;

/// Words that never carry education or credit information.
const FILLER_WORDS: &[&str] = &["DEGREE", "PLUS", "CREDITS", "CREDIT", "HOURS", "GRAD"];

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid header pattern"))
}

fn degree_digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^(BA|MA|B|M)(\d{1,2})$")
}

fn cags_credits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^CAGS\+(\d+)$")
}

fn master_cags_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^MA?\+(\d+)/CAGS$")
}

fn bachelor_thirty_master_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^BA?\+?30/MA$")
}

fn generic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^([0-9]?[A-Z][A-Z']*)(?:\+(\d+))?$")
}

/// Canonical form of a header token or phrase.
///
/// Upper-cases, straightens curly quotes, turns `BA15` into `BA+15`, maps
/// dash/colon separators to `+` and collapses `" + "` to `"+"`.
pub fn normalize_header_token(raw: &str) -> String {
    let upper: String = raw
        .trim()
        .to_uppercase()
        .chars()
        .map(|ch| match ch {
            '\u{2018}' | '\u{2019}' | '\u{201B}' | '`' | '\u{00B4}' => '\'',
            _ => ch,
        })
        .collect();
    let merged = match degree_digits_re().captures(&upper) {
        Some(caps) => format!("{}+{}", &caps[1], &caps[2]),
        None => upper,
    };
    let mut token: String = merged
        .chars()
        .map(|ch| match ch {
            '-' | ':' | '\u{2013}' | '\u{2014}' => '+',
            _ => ch,
        })
        .collect();
    while token.contains(" + ") {
        token = token.replace(" + ", "+");
    }
    token
}

fn parse_credits(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

/// Recognizes a single normalized header token.
///
/// Returns `None` when the token is not a known education header.
pub fn parse_header_token(token: &str, vocabulary: &EducationVocabulary) -> Option<Column> {
    if token == "CAGS" {
        return Some(Column::new(Education::Master, CAGS_DEFAULT_CREDITS));
    }
    if let Some(caps) = cags_credits_re().captures(token) {
        return Some(Column::new(Education::Master, parse_credits(&caps[1])?));
    }
    if let Some(caps) = master_cags_re().captures(token) {
        return Some(Column::new(Education::Master, parse_credits(&caps[1])?));
    }
    if bachelor_thirty_master_re().is_match(token) {
        return Some(Column::new(Education::Master, 0));
    }
    if token.contains("CAGS") && (token.contains("DOC") || token.contains('/')) {
        return Some(Column::new(Education::Doctorate, 0));
    }
    let caps = generic_re().captures(token)?;
    let education = vocabulary.get(&caps[1])?.clone();
    let credits = match caps.get(2) {
        Some(digits) => parse_credits(digits.as_str())?,
        None => 0,
    };
    Some(Column::new(education, credits))
}

/// Recognizes a multi-word header such as `MASTER'S DEGREE +30`.
///
/// The phrase is first tried as one compacted token; otherwise the first
/// vocabulary word sets the education and the first 1-3 digit number after
/// it (before any further vocabulary word) sets the credits.
pub fn parse_header_phrase(phrase: &str, vocabulary: &EducationVocabulary) -> Option<Column> {
    let normalized = normalize_header_token(phrase);
    let compact: String = normalized.split_whitespace().collect();
    if let Some(column) = parse_header_token(&compact, vocabulary) {
        return Some(column);
    }

    let words: Vec<&str> = normalized
        .split(|ch: char| ch.is_whitespace() || matches!(ch, '+' | '/' | '(' | ')' | ','))
        .map(|word| word.trim_matches('.'))
        .filter(|word| !word.is_empty() && !FILLER_WORDS.contains(word))
        .collect();
    let position = words.iter().position(|word| vocabulary.contains(word))?;
    let education_word = words[position];
    let education = vocabulary.get(education_word)?.clone();
    if education_word == "CAGS" && words.iter().any(|word| word.starts_with("DOC")) {
        return Some(Column::new(Education::Doctorate, 0));
    }
    let credits = words[position + 1..]
        .iter()
        .take_while(|word| !vocabulary.contains(word))
        .find_map(|word| leading_credits(word))
        .unwrap_or(if education_word == "CAGS" {
            CAGS_DEFAULT_CREDITS
        } else {
            0
        });
    Some(Column::new(education, credits))
}

/// Leading run of 1-3 digits, e.g. `30` from `30CR`.
fn leading_credits(word: &str) -> Option<u32> {
    let digits: String = word.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || digits.len() > 3 {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<String> {
        parse_header_token(
            &normalize_header_token(raw),
            &EducationVocabulary::default(),
        )
        .map(|column| column.key)
    }

    fn phrase(raw: &str) -> Option<String> {
        parse_header_phrase(raw, &EducationVocabulary::default()).map(|column| column.key)
    }

    #[test]
    fn normalizes_separators_and_quotes() {
        assert_eq!(normalize_header_token("ba15"), "BA+15");
        assert_eq!(normalize_header_token("M5"), "M+5");
        assert_eq!(normalize_header_token("MA-30"), "MA+30");
        assert_eq!(normalize_header_token("MA:45"), "MA+45");
        assert_eq!(normalize_header_token("MA\u{2013}60"), "MA+60");
        assert_eq!(normalize_header_token("Master\u{2019}s"), "MASTER'S");
        assert_eq!(normalize_header_token("MA + 30"), "MA+30");
        assert_eq!(normalize_header_token("MA150"), "MA150");
    }

    #[test]
    fn recognizes_generic_tokens() {
        assert_eq!(parse("B").as_deref(), Some("B"));
        assert_eq!(parse("BA15").as_deref(), Some("B+15"));
        assert_eq!(parse("MA+30").as_deref(), Some("M+30"));
        assert_eq!(parse("Master's").as_deref(), Some("M"));
        assert_eq!(parse("2M").as_deref(), Some("M"));
        assert_eq!(parse("PhD").as_deref(), Some("D"));
        assert_eq!(parse("Doctorate").as_deref(), Some("D"));
        assert_eq!(parse("Step"), None);
        assert_eq!(parse("2023-2024"), None);
        assert_eq!(parse("+30"), None);
    }

    #[test]
    fn recognizes_cags_variants() {
        assert_eq!(parse("CAGS").as_deref(), Some("M+60"));
        assert_eq!(parse("CAGS+45").as_deref(), Some("M+45"));
        assert_eq!(parse("CAGS/DOC").as_deref(), Some("D"));
        assert_eq!(parse("CAGS-DOC").as_deref(), Some("D"));
        assert_eq!(parse("MA+30/CAGS").as_deref(), Some("M+30"));
        assert_eq!(parse("M+60/CAGS").as_deref(), Some("M+60"));
        assert_eq!(parse("B30/MA").as_deref(), Some("M"));
        assert_eq!(parse("B+30/MA").as_deref(), Some("M"));
    }

    #[test]
    fn recognizes_phrases() {
        assert_eq!(phrase("MASTER'S DEGREE +30").as_deref(), Some("M+30"));
        assert_eq!(phrase("Bachelor's + 15").as_deref(), Some("B+15"));
        assert_eq!(phrase("MA 30").as_deref(), Some("M+30"));
        assert_eq!(phrase("MASTERS+30CR").as_deref(), Some("M+30"));
        assert_eq!(phrase("CAGS / DOC").as_deref(), Some("D"));
        assert_eq!(phrase("CAGS PLUS").as_deref(), Some("M+60"));
        assert_eq!(phrase("DEGREE +30"), None);
        assert_eq!(phrase("LANE 4"), None);
    }

    #[test]
    fn uses_injected_vocabulary() {
        let vocabulary = EducationVocabulary::new([("LANE", Education::Master)]);
        let column = parse_header_token("LANE+15", &vocabulary).expect("lane column");
        assert_eq!(column.key, "M+15");
        assert!(parse_header_token("BA", &vocabulary).is_none());
    }
}
