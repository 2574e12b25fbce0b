use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

/// Fetches the text of a page by URL.
///
/// The pipeline never retries: any error aborts the composer being scraped.
pub trait PageFetcher: Send + Sync {
    fn fetch_page_text(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Blocking HTTP fetcher backed by reqwest.
pub struct HttpFetcher {
    http: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_page_text(&self, url: &str) -> Result<String, ScrapeError> {
        log::debug!("Requesting {url}");
        let resp = self.http.get(url).send()?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScrapeError::PageNotFound(url.to_string()));
        }
        if status != reqwest::StatusCode::OK {
            return Err(ScrapeError::Fetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text()?;
        log::debug!("Got response ({} bytes)", text.len());
        Ok(text)
    }
}

/// URL of a composer's "List of works" catalog page.
///
/// `base_url` is expected to end with a slash, e.g. `https://imslp.org/wiki/`.
pub fn composer_page_url(base_url: &str, composer: &str) -> String {
    format!("{}List_of_works_by_{}", base_url, composer.replace(' ', "_"))
}
