//! Save progress reporting.

use musicle_catalog::WorkRecord;

use crate::save::dry_run_lines;

/// Trait for receiving save progress updates.
pub trait ImportProgress {
    /// Called after each work is saved.
    fn on_work(&self, current: usize, total: usize, title: &str);

    /// Called for each work instead of saving it, in a dry run.
    fn on_dry_run(&self, work: &WorkRecord);

    /// Called when a phase starts (e.g., "Saving 120 works by Maurice Ravel").
    fn on_phase(&self, message: &str);

    /// Called when the save is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_work(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_dry_run(&self, _work: &WorkRecord) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_work(&self, current: usize, total: usize, title: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, title);
        }
    }

    fn on_dry_run(&self, work: &WorkRecord) {
        for line in dry_run_lines(work) {
            log::info!("{}", line);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
