//! Composer works data model, composer universe list, and JSON export.
//!
//! This crate defines the records produced by the scraper without any
//! network or database dependencies. Consumers pass [`WorkRecord`]s to
//! `musicle-import` for persistence or to [`export`] for the JSON files.

pub mod composers;
pub mod error;
pub mod export;
pub mod types;

pub use composers::ComposerList;
pub use error::CatalogError;
pub use export::{
    ComposerExport, WorkExport, composer_file_stem, write_combined_export, write_composer_export,
};
pub use types::*;
