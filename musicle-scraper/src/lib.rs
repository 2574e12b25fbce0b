//! Catalog page scraping for composer works.
//!
//! [`Scraper`] ties together page fetching, the [`ComposerRegistry`] of
//! per-composer overrides, the generic table extractor, and custom page
//! scrapers. Row-level problems are recorded in a [`ScrapeLog`]; only
//! page-level failures surface as [`ScrapeError`].

pub mod client;
pub mod config;
pub mod custom;
pub mod dedupe;
pub mod error;
pub mod html;
pub mod log;
pub mod normalize;
pub mod overrides;
pub mod registry;
pub mod scrape;
pub mod table;

pub use client::{HttpFetcher, PageFetcher, composer_page_url};
pub use config::{
    ConfigSource, ConfigSources, ScraperConfig, config_path, config_sources, default_log_dir,
};
pub use custom::HandelScraper;
pub use dedupe::dedupe;
pub use error::ScrapeError;
pub use crate::log::{LogEntry, LogSummary, ScrapeLog};
pub use normalize::{OpusError, OpusParts, RowSkip};
pub use overrides::{
    ColumnMatcher, ComposerOverrides, InvalidWork, NameProvider, OpusParser, PageScraper,
    PostProcessor, WorksFilter,
};
pub use registry::ComposerRegistry;
pub use scrape::{ScrapeEvent, Scraper};
pub use table::{ColumnLayout, RawTableRow, extract_works};
