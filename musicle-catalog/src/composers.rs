//! The universe of scrapeable composers.
//!
//! The list is an ordered JSON array of display names. A default list is
//! embedded in the binary; an alternative file can be loaded at runtime.

use std::path::Path;

use crate::error::CatalogError;

const EMBEDDED_COMPOSERS: &str = include_str!("../data/composers.json");

/// Ordered list of composer display names that may be scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerList {
    names: Vec<String>,
}

impl ComposerList {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// The list compiled into the binary.
    pub fn embedded() -> Self {
        let names = serde_json::from_str(EMBEDDED_COMPOSERS).expect("embedded composer list");
        Self { names }
    }

    /// Load a composer list from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let names: Vec<String> =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(Self { names })
    }

    pub fn contains(&self, composer: &str) -> bool {
        self.names.iter().any(|n| n == composer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The tail of the list beginning at `composer`, for resuming a long run.
    pub fn starting_at(&self, composer: &str) -> Result<&[String], CatalogError> {
        let index = self
            .names
            .iter()
            .position(|n| n == composer)
            .ok_or_else(|| CatalogError::UnknownComposer(composer.to_string()))?;
        Ok(&self.names[index..])
    }
}

impl Default for ComposerList {
    fn default() -> Self {
        Self::embedded()
    }
}
