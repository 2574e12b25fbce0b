//! Whole-page scrapers for composers whose works are not in one catalog table.
//!
//! A custom page is split into captioned sections, each with its own column
//! layout. [`walk_table`] does the row iteration and year handling; each
//! section supplies a [`RowExtractor`] that knows where its fields live.

pub mod handel;

use std::sync::LazyLock;

use chrono::NaiveDate;
use musicle_catalog::{ComposerName, NO_OPUS_NUMBER, WorkRecord};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::html::{DATA_CELL, ROW, TABLE, cell_text};
use crate::log::ScrapeLog;
use crate::normalize::RowSkip;

pub use handel::HandelScraper;

static FOUR_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").expect("static regex"));

/// Fields pulled out of one section row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRow {
    pub title: String,
    pub catalog: String,
    pub date: String,
}

/// Reads a [`SectionRow`] from a row's cell texts; `None` if the row is too
/// short or lacks a title.
pub type RowExtractor = fn(&[String]) -> Option<SectionRow>;

/// Find the first table whose own caption text is exactly `caption`.
///
/// Captions of nested tables do not count for the table around them.
pub fn find_captioned_table<'a>(document: &'a Html, caption: &str) -> Option<ElementRef<'a>> {
    document.select(&TABLE).find(|table| {
        table
            .children()
            .filter_map(ElementRef::wrap)
            .find(|child| child.value().name() == "caption")
            .is_some_and(|c| cell_text(c) == caption)
    })
}

/// Turn every data row of a section table into a work.
///
/// Header rows (no `<td>` cells) are ignored. Rows the extractor rejects, or
/// whose date holds no year, are logged and skipped.
pub fn walk_table(
    table: ElementRef<'_>,
    composer: &ComposerName,
    extract: RowExtractor,
    log: &mut ScrapeLog,
) -> Vec<WorkRecord> {
    let mut works = Vec::new();
    for row in table.select(&ROW) {
        let cells: Vec<String> = row.select(&DATA_CELL).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }

        let Some(fields) = extract(&cells) else {
            log.skip(&composer.full_name, &cells.join(" | "), RowSkip::ShortRow);
            continue;
        };

        let Some(year) = parse_loose_year(&fields.date) else {
            let reason = if fields.date.is_empty() {
                RowSkip::NoYear
            } else {
                RowSkip::InvalidYear(fields.date.clone())
            };
            log.skip(&composer.full_name, &fields.title, reason);
            continue;
        };

        works.push(WorkRecord::new(
            composer.clone(),
            fields.title,
            year,
            fields.catalog,
            NO_OPUS_NUMBER,
        ));
    }
    works
}

/// Best-effort year from free-form date text.
///
/// Tries a full "24 February 1711" date, then a bare year, then the last
/// run of four digits anywhere in the text.
pub fn parse_loose_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%d %B %Y") {
        return Some(chrono::Datelike::year(&date));
    }
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }
    FOUR_DIGITS
        .find_iter(text)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_must_belong_to_the_table() {
        let document = Html::parse_document(
            r#"<table id="layout"><tr><td>
                <table id="operas"><caption>List of operas</caption>
                    <tr><td>HWV 7</td><td>Rinaldo</td></tr>
                </table>
            </td></tr></table>"#,
        );

        let table = find_captioned_table(&document, "List of operas").unwrap();
        assert_eq!(table.value().attr("id"), Some("operas"));
        assert!(find_captioned_table(&document, "List of oratorios").is_none());
    }

    #[test]
    fn full_date() {
        assert_eq!(parse_loose_year("24 February 1711"), Some(1711));
    }

    #[test]
    fn bare_year() {
        assert_eq!(parse_loose_year(" 1738 "), Some(1738));
    }

    #[test]
    fn last_four_digit_run_wins() {
        assert_eq!(parse_loose_year("1707, revised 1737"), Some(1737));
        assert_eq!(parse_loose_year("c. 1720[3]"), Some(1720));
    }

    #[test]
    fn no_year() {
        assert_eq!(parse_loose_year(""), None);
        assert_eq!(parse_loose_year("unknown"), None);
        assert_eq!(parse_loose_year("HWV 56"), None);
    }
}
