//! Write operations: get-or-create upserts on natural keys.

use musicle_catalog::{ComposerName, WorkRecord};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Longest stored work title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The work conflicts with a stored work of the same identity.
    #[error("Duplicate work: {0}")]
    Duplicate(String),
}

/// Cut titles longer than [`MAX_TITLE_LEN`] to 197 characters plus "...".
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_LEN {
        let head: String = title.chars().take(MAX_TITLE_LEN - 3).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

// ── Composer Operations ─────────────────────────────────────────────────────

/// Find a composer by full identity, creating it if missing.
///
/// Returns the row id and whether it was created.
pub fn upsert_composer(
    conn: &Connection,
    name: &ComposerName,
) -> Result<(i64, bool), OperationError> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM composers
             WHERE full_name = ?1 AND first_name = ?2 AND last_name = ?3",
            params![name.full_name, name.first_name, name.last_name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok((id, false));
    }

    conn.execute(
        "INSERT INTO composers (full_name, first_name, last_name) VALUES (?1, ?2, ?3)",
        params![name.full_name, name.first_name, name.last_name],
    )?;
    Ok((conn.last_insert_rowid(), true))
}

// ── Work Operations ─────────────────────────────────────────────────────────

/// Insert a work, or refresh `last_scanned` if the exact row already exists.
///
/// Rows are matched on (composer, title, year, opus, opus number); the title
/// is truncated first. Returns whether a row was created. A work that
/// differs from a stored one only in year fails with
/// [`OperationError::Duplicate`].
pub fn upsert_work(
    conn: &Connection,
    composer_id: i64,
    work: &WorkRecord,
) -> Result<bool, OperationError> {
    let title = truncate_title(&work.work_title);
    let now = chrono::Utc::now().to_rfc3339();

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM works
             WHERE composer_id = ?1 AND work_title = ?2 AND composition_year = ?3
               AND opus = ?4 AND opus_number = ?5",
            params![
                composer_id,
                title,
                work.composition_year,
                work.opus,
                work.opus_number
            ],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        conn.execute(
            "UPDATE works SET last_scanned = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        return Ok(false);
    }

    let inserted = conn.execute(
        "INSERT INTO works (composer_id, work_title, composition_year, opus, opus_number, last_scanned)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            composer_id,
            title,
            work.composition_year,
            work.opus,
            work.opus_number,
            now
        ],
    );

    match inserted {
        Ok(_) => Ok(true),
        Err(e) if is_unique_violation(&e) => Err(OperationError::Duplicate(format!(
            "{} ({})",
            title,
            work.opus_label()
        ))),
        Err(e) => Err(e.into()),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
