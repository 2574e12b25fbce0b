use std::path::Path;

use crate::normalize::RowSkip;

/// A single entry in the scrape log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Scraped {
        composer: String,
        works: usize,
    },
    RowSkipped {
        composer: String,
        /// Title cell text, or the raw opus text when no title was read.
        row: String,
        reason: RowSkip,
    },
    Failed {
        composer: String,
        message: String,
    },
}

/// Collects per-composer results and per-row skips, and writes a log file.
#[derive(Debug, Default)]
pub struct ScrapeLog {
    entries: Vec<LogEntry>,
}

impl ScrapeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Record a dropped row and emit it as a debug diagnostic.
    pub fn skip(&mut self, composer: &str, row: &str, reason: RowSkip) {
        log::debug!("Skipping row in {composer}: {reason}: {row}");
        self.entries.push(LogEntry::RowSkipped {
            composer: composer.to_string(),
            row: row.to_string(),
            reason,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Row skips recorded for one composer.
    pub fn skips_for<'a>(&'a self, composer: &'a str) -> impl Iterator<Item = &'a RowSkip> + 'a {
        self.entries.iter().filter_map(move |e| match e {
            LogEntry::RowSkipped {
                composer: c,
                reason,
                ..
            } if c == composer => Some(reason),
            _ => None,
        })
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Scraped { works, .. } => {
                    summary.composers_scraped += 1;
                    summary.works += works;
                }
                LogEntry::RowSkipped { .. } => summary.rows_skipped += 1,
                LogEntry::Failed { .. } => summary.composers_failed += 1,
            }
        }
        summary
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Scrape Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Composers scraped: {} ({} works)",
            summary.composers_scraped, summary.works
        )?;
        writeln!(file, "Composers failed: {}", summary.composers_failed)?;
        writeln!(file, "Rows skipped: {}", summary.rows_skipped)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Scraped { composer, works } => {
                    writeln!(file, "[OK] {} ({} works)", composer, works)?;
                }
                LogEntry::RowSkipped {
                    composer,
                    row,
                    reason,
                } => {
                    writeln!(file, "[SKIP] {}: {} ({})", composer, row, reason)?;
                }
                LogEntry::Failed { composer, message } => {
                    writeln!(file, "[ERROR] {}: {}", composer, message)?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub composers_scraped: usize,
    pub composers_failed: usize,
    pub works: usize,
    pub rows_skipped: usize,
}
