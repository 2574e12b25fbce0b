//! Per-composer extension points.
//!
//! Each catalog page has its own quirks. Instead of branching on composer
//! names inside the extractor, a composer is given a [`ComposerOverrides`]
//! bundle holding up to six optional capabilities. An absent capability
//! (`None`) means the default behaviour applies; a present one is always
//! consulted, even if it ends up changing nothing.

use musicle_catalog::{ComposerName, WorkRecord};

use crate::client::PageFetcher;
use crate::dedupe::dedupe;
use crate::error::ScrapeError;
use crate::log::ScrapeLog;
use crate::normalize::{OpusError, OpusParts, parse_opus_fallback};

/// Header text of the default date column.
pub const DEFAULT_DATE_HEADER: &str = "Date";
/// Header text of the default opus column.
pub const DEFAULT_OPUS_HEADER: &str = "Opus";

/// Raised by a [`WorksFilter`] to drop a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid work")]
pub struct InvalidWork;

// ── Capabilities ────────────────────────────────────────────────────────────

/// Splits raw opus cell text into an opus label and number.
pub trait OpusParser: Send + Sync {
    fn parse_opus(&self, raw: &str) -> Result<OpusParts, OpusError>;
}

/// Inspects a row's raw title and opus text before generic handling.
///
/// * `Ok(Some(record))`: use this record verbatim for the row.
/// * `Ok(None)`: no opinion, continue with generic handling.
/// * `Err(InvalidWork)`: drop the row.
pub trait WorksFilter: Send + Sync {
    fn filter_work(&self, title: &str, opus: &str) -> Result<Option<WorkRecord>, InvalidWork>;
}

/// Supplies the display name when the catalog page name is not the one to show.
pub trait NameProvider: Send + Sync {
    fn display_name(&self) -> String;
}

/// Decides whether a header cell names a given column.
pub trait ColumnMatcher: Send + Sync {
    fn matches(&self, header: &str) -> bool;
}

/// Transforms the full list of works extracted for a composer.
pub trait PostProcessor: Send + Sync {
    fn post_process(&self, works: Vec<WorkRecord>) -> Vec<WorkRecord>;

    /// Short name shown in capability listings.
    fn label(&self) -> &'static str {
        "post"
    }
}

/// Replaces the generic table extraction for a composer whose source page
/// is not a single catalog table.
pub trait PageScraper: Send + Sync {
    fn scrape_page(
        &self,
        fetcher: &dyn PageFetcher,
        log: &mut ScrapeLog,
    ) -> Result<Vec<WorkRecord>, ScrapeError>;
}

// ── Bundle ──────────────────────────────────────────────────────────────────

/// The override capabilities configured for one composer.
#[derive(Default)]
pub struct ComposerOverrides {
    pub page: Option<Box<dyn PageScraper>>,
    pub opus_parser: Option<Box<dyn OpusParser>>,
    pub works_filter: Option<Box<dyn WorksFilter>>,
    pub name: Option<Box<dyn NameProvider>>,
    pub opus_column: Option<Box<dyn ColumnMatcher>>,
    pub date_column: Option<Box<dyn ColumnMatcher>>,
    pub post_process: Option<Box<dyn PostProcessor>>,
}

impl ComposerOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, scraper: impl PageScraper + 'static) -> Self {
        self.page = Some(Box::new(scraper));
        self
    }

    pub fn opus_parser(mut self, parser: impl OpusParser + 'static) -> Self {
        self.opus_parser = Some(Box::new(parser));
        self
    }

    pub fn works_filter(mut self, filter: impl WorksFilter + 'static) -> Self {
        self.works_filter = Some(Box::new(filter));
        self
    }

    pub fn name(mut self, name: impl NameProvider + 'static) -> Self {
        self.name = Some(Box::new(name));
        self
    }

    pub fn opus_column(mut self, matcher: impl ColumnMatcher + 'static) -> Self {
        self.opus_column = Some(Box::new(matcher));
        self
    }

    pub fn date_column(mut self, matcher: impl ColumnMatcher + 'static) -> Self {
        self.date_column = Some(Box::new(matcher));
        self
    }

    pub fn post_process(mut self, step: impl PostProcessor + 'static) -> Self {
        self.post_process = Some(Box::new(step));
        self
    }

    /// Whether `header` names the date column (default: exactly "Date").
    pub fn is_date_column(&self, header: &str) -> bool {
        match &self.date_column {
            Some(m) => m.matches(header),
            None => header == DEFAULT_DATE_HEADER,
        }
    }

    /// Whether `header` names the opus column (default: exactly "Opus").
    pub fn is_opus_column(&self, header: &str) -> bool {
        match &self.opus_column {
            Some(m) => m.matches(header),
            None => header == DEFAULT_OPUS_HEADER,
        }
    }

    /// Parse opus text with the override, or the fallback rule.
    pub fn parse_opus(&self, raw: &str) -> Result<OpusParts, OpusError> {
        match &self.opus_parser {
            Some(p) => p.parse_opus(raw),
            None => parse_opus_fallback(raw),
        }
    }

    /// Composer identity used on emitted records.
    pub fn composer_name(&self, composer: &str) -> ComposerName {
        match &self.name {
            Some(n) => ComposerName::from_display(&n.display_name()),
            None => ComposerName::from_display(composer),
        }
    }

    /// Run the post-processing step if one is configured.
    pub fn apply_post_process(&self, works: Vec<WorkRecord>) -> Vec<WorkRecord> {
        match &self.post_process {
            Some(step) => step.post_process(works),
            None => works,
        }
    }

    /// Short labels of the configured capabilities, for display.
    pub fn capabilities(&self) -> Vec<&'static str> {
        let mut caps = Vec::new();
        if self.page.is_some() {
            caps.push("page");
        }
        if self.opus_parser.is_some() {
            caps.push("opus");
        }
        if self.works_filter.is_some() {
            caps.push("works");
        }
        if self.name.is_some() {
            caps.push("name");
        }
        if self.opus_column.is_some() {
            caps.push("opus-col");
        }
        if self.date_column.is_some() {
            caps.push("date-col");
        }
        if let Some(step) = &self.post_process {
            caps.push(step.label());
        }
        caps
    }
}

impl std::fmt::Debug for ComposerOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposerOverrides")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

// ── Reusable implementations ────────────────────────────────────────────────

/// Matches a header cell with exactly this text.
#[derive(Debug, Clone, Copy)]
pub struct HeaderIs(pub &'static str);

impl ColumnMatcher for HeaderIs {
    fn matches(&self, header: &str) -> bool {
        header == self.0
    }
}

/// A fixed display name.
#[derive(Debug, Clone, Copy)]
pub struct FixedName(pub &'static str);

impl NameProvider for FixedName {
    fn display_name(&self) -> String {
        self.0.to_string()
    }
}

/// The plain "opus/number" split, configured explicitly.
#[derive(Debug, Clone, Copy)]
pub struct FractionOpus;

impl OpusParser for FractionOpus {
    fn parse_opus(&self, raw: &str) -> Result<OpusParts, OpusError> {
        parse_opus_fallback(raw)
    }
}

/// Removes catalog prefixes (e.g. "Op.", "M.") before the fallback split.
#[derive(Debug, Clone, Copy)]
pub struct StrippedOpus(pub &'static [&'static str]);

impl OpusParser for StrippedOpus {
    fn parse_opus(&self, raw: &str) -> Result<OpusParts, OpusError> {
        let mut text = raw.to_string();
        for prefix in self.0 {
            text = text.replace(prefix, "");
        }
        parse_opus_fallback(&text)
    }
}

/// Collapses works that share an identity, keeping the first occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dedupe;

impl PostProcessor for Dedupe {
    fn post_process(&self, works: Vec<WorkRecord>) -> Vec<WorkRecord> {
        dedupe(works)
    }

    fn label(&self) -> &'static str {
        "dedupe"
    }
}
