use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Scraping failed
    #[error("{0}")]
    Scrape(#[from] musicle_scraper::ScrapeError),

    /// Database open or operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Reading or writing catalog files failed
    #[error("{0}")]
    Catalog(#[from] musicle_catalog::CatalogError),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

impl From<musicle_db::SchemaError> for CliError {
    fn from(e: musicle_db::SchemaError) -> Self {
        Self::database(e.to_string())
    }
}

impl From<musicle_db::OperationError> for CliError {
    fn from(e: musicle_db::OperationError) -> Self {
        Self::database(e.to_string())
    }
}

impl From<musicle_import::ImportError> for CliError {
    fn from(e: musicle_import::ImportError) -> Self {
        Self::database(e.to_string())
    }
}
