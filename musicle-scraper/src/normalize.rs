//! Field normalization for catalog table rows.
//!
//! Turns raw opus and date cell text into a clean `(opus, opus_number, year)`
//! triple and decides when a row is unusable. Unusable rows are reported as
//! [`RowSkip`] values; they never abort a page.

use std::fmt;
use std::sync::LazyLock;

use musicle_catalog::NO_OPUS_NUMBER;
use regex::Regex;

/// Cell text used by catalog pages for "no data".
pub const NO_DATA_PLACEHOLDER: &str = "—";

/// Generic work-type titles that need the key appended to be told apart.
pub const GENERIC_TITLES: &[&str] = &["Impromptu", "Etude-tableau", "Intermezzo"];

/// Substrings removed from a date after splitting.
const DATE_NOISE: &[&str] = &["?", "c.", "ca.", "after", "before", "post"];

static NUMBERED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+\s*No\.\s*\d+").expect("static regex"));

static GROUPING_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("static regex"));

/// Why a table row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSkip {
    /// Opus cell is empty.
    EmptyOpus,
    /// Opus cell holds the no-data glyph.
    NoOpusPlaceholder,
    /// Row has no cell for a required column.
    ShortRow,
    EmptyTitle,
    /// Title like "Piano Trios (3)"; the real entries follow in later rows.
    GroupingPlaceholder,
    /// Opus text could not be split into an opus and integer number.
    InvalidOpus(String),
    /// Date cell is empty, a placeholder, or nothing remains after cleanup.
    NoYear,
    /// Cleaned date text is not a year.
    InvalidYear(String),
    /// A works filter rejected the row.
    InvalidWork,
}

impl fmt::Display for RowSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOpus => write!(f, "empty opus number"),
            Self::NoOpusPlaceholder => write!(f, "no opus number"),
            Self::ShortRow => write!(f, "empty row"),
            Self::EmptyTitle => write!(f, "empty work title"),
            Self::GroupingPlaceholder => write!(f, "grouping placeholder"),
            Self::InvalidOpus(raw) => write!(f, "invalid opus number ({raw})"),
            Self::NoYear => write!(f, "no year"),
            Self::InvalidYear(raw) => write!(f, "invalid year ({raw})"),
            Self::InvalidWork => write!(f, "rejected by works filter"),
        }
    }
}

/// An opus label and its sub-number ([`NO_OPUS_NUMBER`] when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpusParts {
    pub opus: String,
    pub number: i32,
}

impl OpusParts {
    pub fn new(opus: impl Into<String>, number: i32) -> Self {
        Self {
            opus: opus.into(),
            number,
        }
    }

    pub fn unnumbered(opus: impl Into<String>) -> Self {
        Self::new(opus, NO_OPUS_NUMBER)
    }
}

/// Opus text that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid opus number: {0}")]
pub struct OpusError(pub String);

/// Default opus rule: `"15/2"` is opus 15 number 2, `"15"` is opus 15 with no
/// number. A number that is not an integer is an error.
pub fn parse_opus_fallback(raw: &str) -> Result<OpusParts, OpusError> {
    match raw.split_once('/') {
        Some((opus, number)) => {
            let number = number
                .trim()
                .parse::<i32>()
                .map_err(|_| OpusError(raw.to_string()))?;
            Ok(OpusParts::new(opus.trim(), number))
        }
        None => Ok(OpusParts::unnumbered(raw.trim())),
    }
}

/// Check the raw opus cell before any parsing.
pub fn check_opus_text(opus_text: &str) -> Result<(), RowSkip> {
    if opus_text.is_empty() {
        Err(RowSkip::EmptyOpus)
    } else if opus_text == NO_DATA_PLACEHOLDER {
        Err(RowSkip::NoOpusPlaceholder)
    } else {
        Ok(())
    }
}

/// Check a title cell: empty titles and grouping placeholders are skipped.
pub fn check_title(title: &str) -> Result<(), RowSkip> {
    if title.is_empty() {
        Err(RowSkip::EmptyTitle)
    } else if is_grouping_placeholder(title) {
        Err(RowSkip::GroupingPlaceholder)
    } else {
        Ok(())
    }
}

/// A number in parentheses marks a heading row for a group of works.
pub fn is_grouping_placeholder(title: &str) -> bool {
    title.contains('(') && GROUPING_PLACEHOLDER.is_match(title)
}

/// First segment of `s` before `sep`, unless that segment is blank.
///
/// "before 1790" keeps its text so the later noise stripping can recover the
/// year, while "1788 or 1790" becomes "1788 ".
fn first_segment<'a>(s: &'a str, sep: &str) -> &'a str {
    match s.split_once(sep) {
        Some((head, _)) if !head.trim().is_empty() => head,
        _ => s,
    }
}

/// Reduce a date cell to the text of its earliest year.
///
/// Returns `None` when the cell is empty, a placeholder, or nothing is left
/// after cleanup.
pub fn clean_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NO_DATA_PLACEHOLDER {
        return None;
    }

    // Several dates: keep the first.
    let mut date = if raw.contains(',') {
        first_segment(raw, ",")
    } else if raw.contains('/') {
        first_segment(raw, "/")
    } else {
        raw
    };

    // Ranges: keep the start year. Some pages use an ASCII hyphen.
    date = first_segment(date, "\u{2013}");
    date = first_segment(date, "-");

    if date.contains("before") {
        date = first_segment(date, "before");
    } else if date.contains("or") {
        date = first_segment(date, "or");
    } else if date.contains("and") {
        date = first_segment(date, "and");
    }

    let mut cleaned = date.to_string();
    for noise in DATE_NOISE {
        cleaned = cleaned.replace(noise, "");
    }
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Derive a composition year from a date cell.
pub fn parse_year(raw: &str) -> Result<i32, RowSkip> {
    let cleaned = clean_date(raw).ok_or(RowSkip::NoYear)?;
    cleaned
        .parse::<i32>()
        .map_err(|_| RowSkip::InvalidYear(raw.trim().to_string()))
}

/// True when a title cannot be told apart from its siblings without a key.
pub fn needs_key(title: &str) -> bool {
    if title.contains("No.") {
        NUMBERED_TITLE.is_match(title)
    } else {
        GENERIC_TITLES.contains(&title)
    }
}

/// Append " in <key>" to numbered or generic titles.
///
/// An empty key leaves the title unchanged.
pub fn disambiguate_title(title: &str, key: &str) -> String {
    let key = key.trim();
    if !key.is_empty() && needs_key(title) {
        format!("{title} in {key}")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
