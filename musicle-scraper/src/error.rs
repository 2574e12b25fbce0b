/// Errors that abort a composer's scrape.
///
/// Row-level problems are not errors; see [`crate::normalize::RowSkip`].
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Composer not found: {0}")]
    InvalidComposer(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Status ({status}) loading page: {url}")]
    Fetch { status: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No works table found on page")]
    TableNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    /// True for failures of the page-fetch layer (as opposed to page structure).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::PageNotFound(_) | Self::Fetch { .. } | Self::Http(_)
        )
    }
}

impl From<musicle_catalog::CatalogError> for ScrapeError {
    fn from(e: musicle_catalog::CatalogError) -> Self {
        match e {
            musicle_catalog::CatalogError::UnknownComposer(name) => Self::InvalidComposer(name),
            other => Self::Config(other.to_string()),
        }
    }
}
