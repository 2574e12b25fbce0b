//! Composer name to override bundle mapping.

use std::collections::HashMap;

use musicle_catalog::{ComposerName, NO_OPUS_NUMBER, WorkRecord};

use crate::custom::HandelScraper;
use crate::normalize::{OpusError, OpusParts, parse_opus_fallback};
use crate::overrides::{
    ComposerOverrides, Dedupe, FixedName, FractionOpus, HeaderIs, InvalidWork, OpusParser,
    StrippedOpus, WorksFilter,
};

/// Read-only table of per-composer overrides.
///
/// Built once at startup and passed to the scraper. Composers without an
/// entry get the default bundle, so lookups never fail.
#[derive(Debug, Default)]
pub struct ComposerRegistry {
    entries: HashMap<String, ComposerOverrides>,
    fallback: ComposerOverrides,
}

impl ComposerRegistry {
    /// A registry with no composer-specific entries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, composer: impl Into<String>, overrides: ComposerOverrides) -> Self {
        self.entries.insert(composer.into(), overrides);
        self
    }

    /// Overrides for a composer, or the default bundle.
    pub fn get(&self, composer: &str) -> &ComposerOverrides {
        self.entries.get(composer).unwrap_or(&self.fallback)
    }

    pub fn is_configured(&self, composer: &str) -> bool {
        self.entries.contains_key(composer)
    }

    /// The overrides for every composer known to need them.
    pub fn builtin() -> Self {
        Self::new()
            .with(
                "Ludwig van Beethoven",
                ComposerOverrides::new().opus_parser(FractionOpus),
            )
            .with(
                "Wolfgang Amadeus Mozart",
                ComposerOverrides::new().opus_parser(MozartOpus),
            )
            .with(
                "Frédéric Chopin",
                ComposerOverrides::new().works_filter(ChopinWorks),
            )
            .with(
                "Johannes Brahms",
                ComposerOverrides::new().opus_parser(StrippedOpus(&["Op."])),
            )
            .with(
                "Pyotr Tchaikovsky",
                ComposerOverrides::new()
                    .opus_parser(TchaikovskyOpus)
                    .name(FixedName("Pyotr Ilyich Tchaikovsky"))
                    .post_process(Dedupe),
            )
            .with(
                "Franz Schubert",
                ComposerOverrides::new()
                    .opus_column(HeaderIs("D."))
                    .opus_parser(StrippedOpus(&["D.", "*"]))
                    .works_filter(SchubertWorks)
                    .post_process(Dedupe),
            )
            .with(
                "Claude Debussy",
                ComposerOverrides::new()
                    .opus_parser(StrippedOpus(&["CD"]))
                    .opus_column(HeaderIs("Lesure# (new)"))
                    .date_column(HeaderIs("Year")),
            )
            .with(
                "Sergei Rachmaninoff",
                ComposerOverrides::new()
                    .opus_column(HeaderIs("Op."))
                    .post_process(Dedupe),
            )
            .with(
                "Antonín Dvořák",
                ComposerOverrides::new()
                    .opus_column(HeaderIs("Op."))
                    .post_process(Dedupe),
            )
            .with(
                "Maurice Ravel",
                ComposerOverrides::new()
                    .opus_column(HeaderIs("M"))
                    .opus_parser(StrippedOpus(&["M."])),
            )
            .with(
                "George Frideric Handel",
                ComposerOverrides::new().page(HandelScraper::new()),
            )
    }
}

// ── Composer-specific capabilities ──────────────────────────────────────────

/// Köchel numbers: anything after "/" is an alternate K number and dropped.
#[derive(Debug, Clone, Copy)]
pub struct MozartOpus;

impl OpusParser for MozartOpus {
    fn parse_opus(&self, raw: &str) -> Result<OpusParts, OpusError> {
        let opus = raw.split_once('/').map_or(raw, |(head, _)| head);
        Ok(OpusParts::new(opus.trim(), NO_OPUS_NUMBER))
    }
}

/// Some rows write "37//2".
#[derive(Debug, Clone, Copy)]
pub struct TchaikovskyOpus;

impl OpusParser for TchaikovskyOpus {
    fn parse_opus(&self, raw: &str) -> Result<OpusParts, OpusError> {
        parse_opus_fallback(&raw.replace("//", "/"))
    }
}

const ANDANTE_SPIANATO: &str = "Andante spianato et Grande polonaise brillante";

/// The Andante spianato spans rows, which leaves two orphan key rows.
#[derive(Debug, Clone, Copy)]
pub struct ChopinWorks;

impl WorksFilter for ChopinWorks {
    fn filter_work(&self, title: &str, _opus: &str) -> Result<Option<WorkRecord>, InvalidWork> {
        match title {
            "E♭ major" | "G major" => Err(InvalidWork),
            ANDANTE_SPIANATO => Ok(Some(WorkRecord::new(
                ComposerName::from_display("Frédéric Chopin"),
                ANDANTE_SPIANATO,
                1834,
                "22",
                NO_OPUS_NUMBER,
            ))),
            _ => Ok(None),
        }
    }
}

/// Appendix ("Anh.") and uncatalogued ("deest") entries are left out.
#[derive(Debug, Clone, Copy)]
pub struct SchubertWorks;

impl WorksFilter for SchubertWorks {
    fn filter_work(&self, _title: &str, opus: &str) -> Result<Option<WorkRecord>, InvalidWork> {
        if opus.contains("Anh.") || opus.contains("deest") {
            Err(InvalidWork)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
