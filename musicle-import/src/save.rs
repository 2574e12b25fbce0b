//! Save a composer's scraped works.

use std::collections::HashMap;

use musicle_catalog::{ComposerName, WorkRecord};
use musicle_db::OperationError;
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::ImportProgress;
use crate::store::WorkStore;

const DRY_RUN_PREFIX: &str = "[DRY_RUN]";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Whether works are persisted or only reported.
#[derive(Clone, Copy)]
pub enum WriteMode<'a> {
    DryRun,
    Write(&'a dyn WorkStore),
}

impl WriteMode<'_> {
    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// Statistics from saving one batch of works.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveStats {
    pub total: usize,
    pub composers_created: usize,
    pub works_created: usize,
    pub works_rescanned: usize,
    pub duplicates: usize,
    /// Works reported instead of saved, in a dry run.
    pub reported: usize,
}

impl SaveStats {
    pub fn merge(&mut self, other: &SaveStats) {
        self.total += other.total;
        self.composers_created += other.composers_created;
        self.works_created += other.works_created;
        self.works_rescanned += other.works_rescanned;
        self.duplicates += other.duplicates;
        self.reported += other.reported;
    }
}

/// Report lines describing a work that a dry run would save.
pub fn dry_run_lines(work: &WorkRecord) -> Vec<String> {
    vec![
        format!("{DRY_RUN_PREFIX} Composer: {}", work.composer.full_name),
        format!("{DRY_RUN_PREFIX} Work: {}", work.work_title),
        format!("{DRY_RUN_PREFIX}\tYear: {}", work.composition_year),
        format!("{DRY_RUN_PREFIX}\tOpus: {}", work.opus),
        format!("{DRY_RUN_PREFIX}\tOpus number: {}", work.opus_number),
    ]
}

/// Save works, or report them in a dry run.
///
/// Composers are created on first sight. A work that conflicts with a stored
/// one is counted as a duplicate and skipped; any other store error aborts.
pub fn save_composer_works(
    mode: WriteMode<'_>,
    works: &[WorkRecord],
    progress: &dyn ImportProgress,
) -> Result<SaveStats, ImportError> {
    let mut stats = SaveStats {
        total: works.len(),
        ..Default::default()
    };

    let store = match mode {
        WriteMode::DryRun => {
            for work in works {
                progress.on_dry_run(work);
                stats.reported += 1;
            }
            return Ok(stats);
        }
        WriteMode::Write(store) => store,
    };

    let mut composer_ids: HashMap<&ComposerName, i64> = HashMap::new();
    for (i, work) in works.iter().enumerate() {
        let composer_id = match composer_ids.get(&work.composer) {
            Some(id) => *id,
            None => {
                let (id, created) = store.upsert_composer(&work.composer)?;
                if created {
                    log::info!("Added composer: {}", work.composer.full_name);
                    stats.composers_created += 1;
                }
                composer_ids.insert(&work.composer, id);
                id
            }
        };

        match store.upsert_work(composer_id, work) {
            Ok(true) => {
                log::debug!("Added work: {}", work.work_title);
                stats.works_created += 1;
            }
            Ok(false) => stats.works_rescanned += 1,
            Err(OperationError::Duplicate(what)) => {
                log::info!("Found duplicate work, skipping: {what}");
                stats.duplicates += 1;
            }
            Err(e) => return Err(e.into()),
        }

        progress.on_work(i + 1, works.len(), &work.work_title);
    }

    Ok(stats)
}

/// Save works to a SQLite database in one transaction.
pub fn save_to_database(
    conn: &Connection,
    works: &[WorkRecord],
    progress: &dyn ImportProgress,
) -> Result<SaveStats, ImportError> {
    let tx = conn.unchecked_transaction()?;
    let stats = save_composer_works(WriteMode::Write(&*tx), works, progress)?;
    tx.commit()?;
    Ok(stats)
}
