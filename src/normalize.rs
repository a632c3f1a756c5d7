use std::sync::LazyLock;

use regex::Regex;

// `.` does not cross newlines, so each line is stripped independently and a
// line with several groups loses everything between the first opener and
// the last closer.
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("valid regex"));
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*\]").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));
static FILENAME_RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[{}\[\]/?.,;:|)*~`!^\-+<>@#$%&\\=('"]"#).expect("valid regex")
});

pub const FULL_WIDTH_COLON: char = '：';
pub const FULL_WIDTH_QUESTION: char = '？';
pub const FULL_WIDTH_SLASH: char = '／';

/// Cleans one title fragment (main title or subtitle) scraped from a catalog page.
#[must_use]
pub fn normalize_title_fragment(input: &str) -> String {
    let without_parens = PARENTHESIZED.replace_all(input, "");
    let without_brackets = BRACKETED.replace_all(&without_parens, "");
    without_brackets
        .replace(':', &FULL_WIDTH_COLON.to_string())
        .replace('?', &FULL_WIDTH_QUESTION.to_string())
        .trim()
        .to_owned()
}

#[must_use]
pub fn normalized_title(main_title: &str, sub_title: Option<&str>) -> String {
    let main = normalize_title_fragment(main_title);
    match sub_title {
        Some(sub) => format!("{main}{FULL_WIDTH_COLON}{}", normalize_title_fragment(sub)),
        None => main,
    }
}

#[must_use]
pub fn record_title(normalized: &str) -> String {
    let cleaned = normalized
        .replace(FULL_WIDTH_COLON, " ")
        .replace(FULL_WIDTH_QUESTION, "")
        .replace('/', &FULL_WIDTH_SLASH.to_string());
    WHITESPACE_RUN.replace_all(&cleaned, " ").into_owned()
}

#[must_use]
pub fn note_file_stem(record_title: &str) -> String {
    FILENAME_RESERVED.replace_all(record_title, "").into_owned()
}
