use thiserror::Error;

/// Errors from reading or writing catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Composer not found: {0}")]
    UnknownComposer(String),
}
