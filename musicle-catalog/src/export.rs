//! JSON export of scraped works, in the shape consumed by the puzzle app.
//!
//! Each composer gets its own file under `composer_data/`, and a full run
//! additionally writes every composer into `parsed_composers.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::WorkRecord;

/// Combined output file name for a full run.
pub const COMBINED_EXPORT_FILE: &str = "parsed_composers.json";

/// Subdirectory holding one file per composer.
pub const COMPOSER_EXPORT_DIR: &str = "composer_data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerExport {
    pub id: usize,
    pub firstname: String,
    pub lastname: String,
    pub fullname: String,
    pub works: Vec<WorkExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExport {
    pub id: usize,
    pub work_title: String,
    pub composition_year: i32,
    pub opus: String,
    pub opus_number: i32,
}

impl ComposerExport {
    /// Build the export for one composer. Returns `None` for an empty list,
    /// since the composer identity comes from the records themselves.
    pub fn from_works(id: usize, works: &[WorkRecord]) -> Option<Self> {
        let first = works.first()?;
        Some(Self {
            id,
            firstname: first.composer.first_name.clone(),
            lastname: first.composer.last_name.clone(),
            fullname: first.composer.full_name.clone(),
            works: works
                .iter()
                .enumerate()
                .map(|(i, w)| WorkExport {
                    id: i,
                    work_title: w.work_title.clone(),
                    composition_year: w.composition_year,
                    opus: w.opus.clone(),
                    opus_number: w.opus_number,
                })
                .collect(),
        })
    }
}

/// File stem for a composer's export: lower-case, spaces to underscores,
/// periods and commas removed.
pub fn composer_file_stem(composer: &str) -> String {
    composer
        .to_lowercase()
        .replace(' ', "_")
        .replace(['.', ','], "")
}

/// Write `<dir>/composer_data/<stem>.json`. Returns the written path.
pub fn write_composer_export(
    dir: &Path,
    composer: &str,
    export: &ComposerExport,
) -> Result<PathBuf, CatalogError> {
    let path = dir
        .join(COMPOSER_EXPORT_DIR)
        .join(format!("{}.json", composer_file_stem(composer)));
    write_json(&path, export)?;
    Ok(path)
}

/// Write `<dir>/parsed_composers.json`. Returns the written path.
pub fn write_combined_export(
    dir: &Path,
    exports: &[ComposerExport],
) -> Result<PathBuf, CatalogError> {
    let path = dir.join(COMBINED_EXPORT_FILE);
    write_json(&path, &exports)?;
    Ok(path)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let io_err = |e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| CatalogError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(io_err)
}
