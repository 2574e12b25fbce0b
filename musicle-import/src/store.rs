//! The persistence seam used by [`save_composer_works`](crate::save_composer_works).

use musicle_catalog::{ComposerName, WorkRecord};
use musicle_db::OperationError;
use rusqlite::Connection;

/// Upsert-by-natural-key storage for composers and works.
pub trait WorkStore {
    /// Get or create a composer. Returns its id and whether it was created.
    fn upsert_composer(&self, name: &ComposerName) -> Result<(i64, bool), OperationError>;

    /// Insert a work or refresh an identical one. Returns whether it was
    /// created. Conflicts on the work identity are
    /// [`OperationError::Duplicate`].
    fn upsert_work(&self, composer_id: i64, work: &WorkRecord) -> Result<bool, OperationError>;
}

impl WorkStore for Connection {
    fn upsert_composer(&self, name: &ComposerName) -> Result<(i64, bool), OperationError> {
        musicle_db::upsert_composer(self, name)
    }

    fn upsert_work(&self, composer_id: i64, work: &WorkRecord) -> Result<bool, OperationError> {
        musicle_db::upsert_work(self, composer_id, work)
    }
}
