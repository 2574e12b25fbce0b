//! Data model types for the composer works catalog.
//!
//! A [`WorkRecord`] is the unit produced by the scraper and handed to the
//! persistence layer. Records are built once and never mutated afterwards.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Opus number sentinel meaning "this work has no sub-number".
///
/// This is not "unknown": a work catalogued as `Op. 15` has no number, while
/// `Op. 15/2` has number 2.
pub const NO_OPUS_NUMBER: i32 = -1;

// ── Composer ────────────────────────────────────────────────────────────────

/// A composer's display identity, split into first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComposerName {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl ComposerName {
    /// Split a display name on whitespace: the first token is the first name,
    /// the last token is the last name.
    ///
    /// Multi-word surnames are not recognised, so "Ludwig van Beethoven"
    /// yields last name "Beethoven" and drops "van" from both parts.
    pub fn from_display(display_name: &str) -> Self {
        let full_name = display_name.trim().to_string();
        let mut tokens = full_name.split_whitespace();
        let first_name = tokens.next().unwrap_or_default().to_string();
        let last_name = tokens
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| first_name.clone());
        Self {
            first_name,
            last_name,
            full_name,
        }
    }
}

// ── Work ────────────────────────────────────────────────────────────────────

/// One catalogued work of a composer.
///
/// Equality and hashing deliberately ignore `composition_year`: arrangements of
/// the same work are often listed with different years, and they must collapse
/// to a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRecord {
    pub composer: ComposerName,
    pub work_title: String,
    pub composition_year: i32,
    pub opus: String,
    pub opus_number: i32,
}

impl WorkRecord {
    pub fn new(
        composer: ComposerName,
        work_title: impl Into<String>,
        composition_year: i32,
        opus: impl Into<String>,
        opus_number: i32,
    ) -> Self {
        Self {
            composer,
            work_title: work_title.into(),
            composition_year,
            opus: opus.into(),
            opus_number,
        }
    }

    /// True when the work carries a sub-number within its opus.
    pub fn has_opus_number(&self) -> bool {
        self.opus_number != NO_OPUS_NUMBER
    }

    /// Human-readable catalog label, e.g. `15` or `15/2`.
    pub fn opus_label(&self) -> String {
        if self.has_opus_number() {
            format!("{}/{}", self.opus, self.opus_number)
        } else {
            self.opus.clone()
        }
    }
}

impl PartialEq for WorkRecord {
    fn eq(&self, other: &Self) -> bool {
        self.composer == other.composer
            && self.work_title == other.work_title
            && self.opus == other.opus
            && self.opus_number == other.opus_number
    }
}

impl Eq for WorkRecord {}

impl Hash for WorkRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.composer.hash(state);
        self.work_title.hash(state);
        self.opus.hash(state);
        self.opus_number.hash(state);
    }
}
