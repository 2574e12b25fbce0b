//! Persist scraped works, or report them in a dry run.
//!
//! The scraper produces in-memory [`WorkRecord`](musicle_catalog::WorkRecord)s;
//! this crate hands them to a [`WorkStore`] using get-or-create semantics and
//! turns duplicate-key conflicts into counted, logged skips.

pub mod progress;
pub mod save;
pub mod store;

pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use save::{ImportError, SaveStats, WriteMode, dry_run_lines, save_composer_works, save_to_database};
pub use store::WorkStore;
