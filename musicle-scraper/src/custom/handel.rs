use musicle_catalog::{ComposerName, WorkRecord};
use scraper::Html;

use super::{RowExtractor, SectionRow, find_captioned_table, walk_table};
use crate::client::PageFetcher;
use crate::error::ScrapeError;
use crate::log::ScrapeLog;
use crate::overrides::PageScraper;

pub const HANDEL_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_compositions_by_George_Frideric_Handel";

const HANDEL: &str = "George Frideric Handel";

/// Captioned sections and how to read their rows.
const SECTIONS: &[(&str, RowExtractor)] = &[
    ("List of operas", opera_row),
    ("List of oratorios", oratorio_row),
    ("List of concertos", concerto_row),
    ("List of sonatas", sonata_row),
];

/// Handel's works are catalogued by HWV number on a Wikipedia list page with
/// one table per genre.
#[derive(Debug, Clone)]
pub struct HandelScraper {
    url: String,
}

impl Default for HandelScraper {
    fn default() -> Self {
        Self {
            url: HANDEL_URL.to_string(),
        }
    }
}

impl HandelScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse all known sections. Missing sections are skipped; a page with
    /// none of them is a structural mismatch.
    pub fn parse_page(
        &self,
        page_html: &str,
        log: &mut ScrapeLog,
    ) -> Result<Vec<WorkRecord>, ScrapeError> {
        let document = Html::parse_document(page_html);
        let composer = ComposerName::from_display(HANDEL);

        let mut found_any = false;
        let mut works = Vec::new();
        for (caption, extract) in SECTIONS {
            let Some(table) = find_captioned_table(&document, caption) else {
                log::debug!("{HANDEL}: no section \"{caption}\"");
                continue;
            };
            found_any = true;
            let section = walk_table(table, &composer, *extract, log);
            log::debug!("{HANDEL}: {} works in \"{caption}\"", section.len());
            works.extend(section);
        }

        if !found_any {
            return Err(ScrapeError::TableNotFound);
        }
        Ok(works)
    }
}

impl PageScraper for HandelScraper {
    fn scrape_page(
        &self,
        fetcher: &dyn PageFetcher,
        log: &mut ScrapeLog,
    ) -> Result<Vec<WorkRecord>, ScrapeError> {
        let text = fetcher.fetch_page_text(&self.url)?;
        self.parse_page(&text, log)
    }
}

/// "HWV 56" and "56" both become "56".
fn hwv(cell: &str) -> String {
    cell.trim_start_matches("HWV").trim().to_string()
}

fn non_empty(cells: &[String], index: usize) -> Option<&str> {
    cells
        .get(index)
        .map(String::as_str)
        .filter(|s| !s.is_empty())
}

/// HWV | Title | Genre | Premiere | ...
fn opera_row(cells: &[String]) -> Option<SectionRow> {
    Some(SectionRow {
        catalog: hwv(non_empty(cells, 0)?),
        title: non_empty(cells, 1)?.to_string(),
        date: cells.get(3)?.clone(),
    })
}

/// HWV | Title | Date | ...
fn oratorio_row(cells: &[String]) -> Option<SectionRow> {
    Some(SectionRow {
        catalog: hwv(non_empty(cells, 0)?),
        title: non_empty(cells, 1)?.to_string(),
        date: cells.get(2)?.clone(),
    })
}

/// HWV | Instrument | Key | Date | ...
fn concerto_row(cells: &[String]) -> Option<SectionRow> {
    instrumental_row(cells, "Concerto")
}

/// HWV | Instrument | Key | Date | ...
fn sonata_row(cells: &[String]) -> Option<SectionRow> {
    instrumental_row(cells, "Sonata")
}

fn instrumental_row(cells: &[String], genre: &str) -> Option<SectionRow> {
    let instrument = non_empty(cells, 1)?;
    let title = match non_empty(cells, 2) {
        Some(key) => format!("{genre} for {instrument} in {key}"),
        None => format!("{genre} for {instrument}"),
    };
    Some(SectionRow {
        catalog: hwv(non_empty(cells, 0)?),
        title,
        date: cells.get(3)?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn opera_fields() {
        let row = opera_row(&cells(&["HWV 7", "Rinaldo", "opera seria", "24 February 1711"])).unwrap();
        assert_eq!(row.catalog, "7");
        assert_eq!(row.title, "Rinaldo");
        assert_eq!(row.date, "24 February 1711");
    }

    #[test]
    fn concerto_title_includes_instrument_and_key() {
        let row = concerto_row(&cells(&["289", "Organ", "G minor", "1735"])).unwrap();
        assert_eq!(row.title, "Concerto for Organ in G minor");
        assert_eq!(row.catalog, "289");
    }

    #[test]
    fn sonata_without_key() {
        let row = sonata_row(&cells(&["HWV 378", "Flute", "", "c. 1707"])).unwrap();
        assert_eq!(row.title, "Sonata for Flute");
    }

    #[test]
    fn short_rows_are_rejected() {
        assert!(oratorio_row(&cells(&["HWV 56", "Messiah"])).is_none());
        assert!(concerto_row(&cells(&["", "Organ", "F major", "1739"])).is_none());
    }
}
