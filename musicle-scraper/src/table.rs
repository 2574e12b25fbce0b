//! Generic catalog table extraction.
//!
//! A standard catalog page carries one sortable table. The first row names
//! the columns; every following row is one work. Rows that cannot be turned
//! into a [`WorkRecord`] are recorded in the [`ScrapeLog`] and skipped.

use musicle_catalog::{ComposerName, WorkRecord};
use scraper::{ElementRef, Html};

use crate::error::ScrapeError;
use crate::html::{DATA_CELL, HEADER_CELL, ROW, WORKS_TABLE, cell_text, text_without_hidden};
use crate::log::ScrapeLog;
use crate::normalize::{RowSkip, check_opus_text, check_title, disambiguate_title, parse_year};
use crate::overrides::ComposerOverrides;

const TITLE_HEADER: &str = "Title";
const KEY_HEADER: &str = "Key";

/// Column indices resolved from a table's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub title: Option<usize>,
    pub date: Option<usize>,
    pub key: Option<usize>,
    /// Falls back to the first column when no header matches.
    pub opus: usize,
}

impl ColumnLayout {
    /// Classify header cells. Each role goes to the first header that
    /// matches it; a header fills at most one role, checked in the order
    /// title, date, key, opus.
    pub fn from_headers<S: AsRef<str>>(headers: &[S], overrides: &ComposerOverrides) -> Self {
        let mut title = None;
        let mut date = None;
        let mut key = None;
        let mut opus = None;

        for (i, header) in headers.iter().enumerate() {
            let header = header.as_ref().trim();
            if header == TITLE_HEADER {
                title.get_or_insert(i);
            } else if overrides.is_date_column(header) {
                date.get_or_insert(i);
            } else if header == KEY_HEADER {
                key.get_or_insert(i);
            } else if overrides.is_opus_column(header) {
                opus.get_or_insert(i);
            }
        }

        Self {
            title,
            date,
            key,
            opus: opus.unwrap_or(0),
        }
    }
}

/// Cell texts of one data row. Only meaningful with the [`ColumnLayout`] of
/// the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTableRow {
    pub cells: Vec<String>,
}

impl RawTableRow {
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a `<tr>`; the opus cell has its hidden annotation removed.
    fn from_element(row: ElementRef<'_>, layout: &ColumnLayout) -> Self {
        let cells = row
            .select(&DATA_CELL)
            .enumerate()
            .map(|(i, td)| {
                if i == layout.opus {
                    text_without_hidden(td)
                } else {
                    cell_text(td)
                }
            })
            .collect();
        Self { cells }
    }

    fn cell(&self, index: Option<usize>) -> Option<&str> {
        index.and_then(|i| self.cells.get(i)).map(String::as_str)
    }

    /// Short description for log lines.
    fn label(&self, layout: &ColumnLayout) -> String {
        self.cell(layout.title)
            .filter(|t| !t.is_empty())
            .or_else(|| self.cell(Some(layout.opus)))
            .unwrap_or_default()
            .to_string()
    }
}

/// Turn one data row into a work, or say why it was dropped.
pub fn normalize_row(
    row: &RawTableRow,
    layout: &ColumnLayout,
    composer: &ComposerName,
    overrides: &ComposerOverrides,
) -> Result<WorkRecord, RowSkip> {
    let opus_text = row.cell(Some(layout.opus)).ok_or(RowSkip::ShortRow)?;
    check_opus_text(opus_text)?;

    let title = row.cell(layout.title).ok_or(RowSkip::ShortRow)?;

    if let Some(filter) = &overrides.works_filter {
        match filter.filter_work(title, opus_text) {
            Ok(Some(record)) => return Ok(record),
            Ok(None) => {}
            Err(_) => return Err(RowSkip::InvalidWork),
        }
    }

    check_title(title)?;

    let parts = overrides
        .parse_opus(opus_text)
        .map_err(|_| RowSkip::InvalidOpus(opus_text.to_string()))?;

    let year = parse_year(row.cell(layout.date).unwrap_or_default())?;

    let key = row.cell(layout.key).unwrap_or_default();
    let work_title = disambiguate_title(title, key);

    Ok(WorkRecord::new(
        composer.clone(),
        work_title,
        year,
        parts.opus,
        parts.number,
    ))
}

/// Extract all works from a standard catalog page.
///
/// Fails only when the page has no catalog table. The composer's
/// post-processing step, if any, is applied to the result.
pub fn extract_works(
    composer: &str,
    page_html: &str,
    overrides: &ComposerOverrides,
    log: &mut ScrapeLog,
) -> Result<Vec<WorkRecord>, ScrapeError> {
    let document = Html::parse_document(page_html);
    let table = document
        .select(&WORKS_TABLE)
        .next()
        .ok_or(ScrapeError::TableNotFound)?;

    let mut rows = table.select(&ROW);
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.select(&HEADER_CELL).map(cell_text).collect();
    let layout = ColumnLayout::from_headers(&headers, overrides);
    log::debug!("{composer}: columns {layout:?}");

    let name = overrides.composer_name(composer);
    let mut works = Vec::new();
    for row in rows {
        let raw = RawTableRow::from_element(row, &layout);
        match normalize_row(&raw, &layout, &name, overrides) {
            Ok(work) => works.push(work),
            Err(reason) => log.skip(composer, &raw.label(&layout), reason),
        }
    }

    Ok(overrides.apply_post_process(works))
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
