//! Works database layout, versioning and upgrades.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database schema v{found} is newer than this build supports (v{expected})")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Layout version written by this build.
pub const CURRENT_VERSION: i32 = 2;

/// Upgrade steps, keyed by the version they upgrade from.
const UPGRADES: &[(i32, &str)] = &[(1, "ALTER TABLE works ADD COLUMN last_scanned TEXT;")];

/// Create every table and index that is missing and stamp the version.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    record_version(conn, CURRENT_VERSION)
}

/// Open the works database at `path`, creating or upgrading it as needed.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)?,
        _ => {}
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    match schema_version(&conn)? {
        0 => create_schema(&conn)?,
        CURRENT_VERSION => {}
        found => upgrade(&conn, found)?,
    }
    Ok(conn)
}

/// Fresh in-memory works database.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Stored layout version; 0 for a database that has never been set up.
pub fn schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(0);
    }

    let version = conn.query_row("SELECT IFNULL(MAX(version), 0) FROM schema_version", [], |row| {
        row.get(0)
    })?;
    Ok(version)
}

fn record_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

fn upgrade(conn: &Connection, found: i32) -> Result<(), SchemaError> {
    if found > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found,
        });
    }

    for version in found..CURRENT_VERSION {
        if let Some((_, sql)) = UPGRADES.iter().find(|(from, _)| *from == version) {
            log::info!("Upgrading works database from v{version}");
            conn.execute_batch(sql)?;
        }
        record_version(conn, version + 1)?;
    }
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS composers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(full_name, first_name, last_name)
);

-- A work's identity ignores the year, so a second listing of the same work
-- under another year conflicts with the first.
CREATE TABLE IF NOT EXISTS works (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    composer_id INTEGER NOT NULL REFERENCES composers(id) ON DELETE CASCADE,
    work_title TEXT NOT NULL,
    composition_year INTEGER NOT NULL,
    opus TEXT NOT NULL,
    opus_number INTEGER NOT NULL DEFAULT -1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    last_scanned TEXT,
    UNIQUE(composer_id, work_title, opus, opus_number)
);

CREATE INDEX IF NOT EXISTS idx_works_composer ON works(composer_id);
CREATE INDEX IF NOT EXISTS idx_works_year ON works(composition_year);
"#;
