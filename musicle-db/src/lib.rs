//! SQLite persistence for composers and their works.
//!
//! Provides schema creation, get-or-create style upserts keyed on each
//! table's natural key, and a few read queries, backed by SQLite (via
//! rusqlite with the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{OperationError, truncate_title, upsert_composer, upsert_work, MAX_TITLE_LEN};
pub use queries::{
    CatalogStats, ComposerRow, WorkRow, catalog_stats, find_composer, list_composers,
    works_for_composer,
};
pub use schema::{CURRENT_VERSION, SchemaError, open_database, open_memory};
