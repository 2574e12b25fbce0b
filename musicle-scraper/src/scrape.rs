//! Per-composer scrape orchestration.
//!
//! Resolves a composer's overrides, fetches the page, and runs either the
//! composer's page scraper or the generic table extractor. In a full run
//! each composer is independent: a failure is reported and the run goes on.

use musicle_catalog::{ComposerList, WorkRecord};

use crate::client::{HttpFetcher, PageFetcher, composer_page_url};
use crate::config::{DEFAULT_BASE_URL, ScraperConfig};
use crate::error::ScrapeError;
use crate::log::{LogEntry, ScrapeLog};
use crate::registry::ComposerRegistry;
use crate::table::extract_works;

/// Progress events emitted by [`Scraper::scrape_all`].
#[derive(Debug)]
pub enum ScrapeEvent {
    /// A composer is about to be fetched.
    Started {
        index: usize,
        total: usize,
        composer: String,
    },
    /// A composer's works were extracted.
    Completed {
        index: usize,
        composer: String,
        works: Vec<WorkRecord>,
    },
    /// A composer could not be scraped. The run continues.
    Failed {
        index: usize,
        composer: String,
        error: ScrapeError,
    },
}

/// Scrapes composers from the universe list.
pub struct Scraper {
    registry: ComposerRegistry,
    composers: ComposerList,
    fetcher: Box<dyn PageFetcher>,
    base_url: String,
}

impl Scraper {
    pub fn new(
        registry: ComposerRegistry,
        composers: ComposerList,
        fetcher: Box<dyn PageFetcher>,
    ) -> Self {
        Self {
            registry,
            composers,
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Built-in registry, the configured composer list, and an HTTP fetcher.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let composers = match &config.composers_file {
            Some(path) => ComposerList::load(path)?,
            None => ComposerList::embedded(),
        };
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(ComposerRegistry::builtin(), composers, Box::new(fetcher))
            .with_base_url(config.base_url.clone()))
    }

    pub fn registry(&self) -> &ComposerRegistry {
        &self.registry
    }

    pub fn composers(&self) -> &ComposerList {
        &self.composers
    }

    /// Scrape one composer.
    ///
    /// Names outside the universe list fail with
    /// [`ScrapeError::InvalidComposer`] before anything is fetched.
    pub fn scrape_composer(
        &self,
        composer: &str,
        log: &mut ScrapeLog,
    ) -> Result<Vec<WorkRecord>, ScrapeError> {
        let result = if self.composers.contains(composer) {
            self.scrape_listed(composer, log)
        } else {
            Err(ScrapeError::InvalidComposer(composer.to_string()))
        };

        match &result {
            Ok(works) => log.add(LogEntry::Scraped {
                composer: composer.to_string(),
                works: works.len(),
            }),
            Err(e) => log.add(LogEntry::Failed {
                composer: composer.to_string(),
                message: e.to_string(),
            }),
        }
        result
    }

    /// Extract works from an already-fetched standard catalog page.
    pub fn scrape_page_text(
        &self,
        composer: &str,
        page_html: &str,
        log: &mut ScrapeLog,
    ) -> Result<Vec<WorkRecord>, ScrapeError> {
        extract_works(composer, page_html, self.registry.get(composer), log)
    }

    /// Scrape every listed composer in order, optionally starting at
    /// `start_at`.
    ///
    /// Per-composer failures are reported through `on_event` and do not stop
    /// the run. The only error returned is an unknown `start_at` name.
    pub fn scrape_all(
        &self,
        start_at: Option<&str>,
        log: &mut ScrapeLog,
        mut on_event: impl FnMut(ScrapeEvent),
    ) -> Result<(), ScrapeError> {
        let names: Vec<&str> = match start_at {
            Some(name) => self
                .composers
                .starting_at(name)?
                .iter()
                .map(String::as_str)
                .collect(),
            None => self.composers.iter().collect(),
        };

        let total = names.len();
        for (index, composer) in names.into_iter().enumerate() {
            on_event(ScrapeEvent::Started {
                index,
                total,
                composer: composer.to_string(),
            });
            match self.scrape_composer(composer, log) {
                Ok(works) => on_event(ScrapeEvent::Completed {
                    index,
                    composer: composer.to_string(),
                    works,
                }),
                Err(error) => {
                    log::warn!("Failed to scrape {composer}: {error}");
                    on_event(ScrapeEvent::Failed {
                        index,
                        composer: composer.to_string(),
                        error,
                    });
                }
            }
        }
        Ok(())
    }

    fn scrape_listed(
        &self,
        composer: &str,
        log: &mut ScrapeLog,
    ) -> Result<Vec<WorkRecord>, ScrapeError> {
        let overrides = self.registry.get(composer);

        if let Some(page) = &overrides.page {
            log::info!("Scraping {composer} with a custom page scraper");
            let works = page.scrape_page(self.fetcher.as_ref(), log)?;
            return Ok(overrides.apply_post_process(works));
        }

        let url = composer_page_url(&self.base_url, composer);
        log::info!("Scraping {url}");
        let text = self.fetcher.fetch_page_text(&url)?;
        extract_works(composer, &text, overrides, log)
    }
}
