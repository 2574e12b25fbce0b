//! Read queries for the works database.

use rusqlite::{Connection, OptionalExtension, params};

use crate::operations::OperationError;

// ── Composer Queries ────────────────────────────────────────────────────────

/// A stored composer with its work count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerRow {
    pub id: i64,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub works: i64,
}

const COMPOSER_SELECT: &str = "SELECT c.id, c.full_name, c.first_name, c.last_name, COUNT(w.id)
     FROM composers c LEFT JOIN works w ON w.composer_id = c.id";

fn row_to_composer(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComposerRow> {
    Ok(ComposerRow {
        id: row.get(0)?,
        full_name: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        works: row.get(4)?,
    })
}

/// List all composers, by last name.
pub fn list_composers(conn: &Connection) -> Result<Vec<ComposerRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "{COMPOSER_SELECT} GROUP BY c.id ORDER BY c.last_name, c.full_name"
    ))?;
    let rows = stmt.query_map([], row_to_composer)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a composer by full name.
pub fn find_composer(
    conn: &Connection,
    full_name: &str,
) -> Result<Option<ComposerRow>, OperationError> {
    conn.query_row(
        &format!("{COMPOSER_SELECT} WHERE c.full_name = ?1 GROUP BY c.id"),
        params![full_name],
        row_to_composer,
    )
    .optional()
    .map_err(Into::into)
}

// ── Work Queries ────────────────────────────────────────────────────────────

/// A stored work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRow {
    pub id: i64,
    pub work_title: String,
    pub composition_year: i32,
    pub opus: String,
    pub opus_number: i32,
    pub last_scanned: Option<String>,
}

/// All works of a composer in insertion order.
pub fn works_for_composer(
    conn: &Connection,
    composer_id: i64,
) -> Result<Vec<WorkRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, work_title, composition_year, opus, opus_number, last_scanned
         FROM works WHERE composer_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![composer_id], |row| {
        Ok(WorkRow {
            id: row.get(0)?,
            work_title: row.get(1)?,
            composition_year: row.get(2)?,
            opus: row.get(3)?,
            opus_number: row.get(4)?,
            last_scanned: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary statistics for the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub composers: i64,
    pub works: i64,
    pub earliest_year: Option<i32>,
    pub latest_year: Option<i32>,
    pub last_scanned: Option<String>,
}

/// Get overall database statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let composers: i64 = conn.query_row("SELECT COUNT(*) FROM composers", [], |r| r.get(0))?;
    let (works, earliest_year, latest_year, last_scanned) = conn.query_row(
        "SELECT COUNT(*), MIN(composition_year), MAX(composition_year), MAX(last_scanned)
         FROM works",
        [],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
    )?;

    Ok(CatalogStats {
        composers,
        works,
        earliest_year,
        latest_year,
        last_scanned,
    })
}
