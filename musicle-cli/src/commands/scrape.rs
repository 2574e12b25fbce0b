use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use musicle_catalog::{ComposerExport, WorkRecord, write_combined_export, write_composer_export};
use musicle_import::{ImportProgress, SaveStats, WriteMode, dry_run_lines, save_composer_works};
use musicle_scraper::{ScrapeEvent, ScrapeLog, Scraper, ScraperConfig, default_log_dir};

use crate::cli_types::ScrapeArgs;
use crate::error::CliError;

/// Save progress shown on the run's progress bar.
struct BarProgress<'a> {
    pb: &'a ProgressBar,
}

impl ImportProgress for BarProgress<'_> {
    fn on_work(&self, current: usize, total: usize, title: &str) {
        self.pb.set_message(format!("[{current}/{total}] {title}"));
    }

    fn on_dry_run(&self, work: &WorkRecord) {
        self.pb.suspend(|| {
            for line in dry_run_lines(work) {
                log::info!("{}", line);
            }
        });
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.pb.suspend(|| log::debug!("{}", message));
    }
}

/// Totals for the whole run.
#[derive(Default)]
struct RunTotals {
    scraped: usize,
    failed: usize,
    save_failed: usize,
    stats: SaveStats,
    exports: Vec<ComposerExport>,
}

/// Per-run state shared by the single-composer and full-run paths.
struct Session<'a> {
    conn: Option<&'a Connection>,
    export_dir: Option<&'a Path>,
    totals: RunTotals,
}

impl Session<'_> {
    fn save(&mut self, composer: &str, works: &[WorkRecord], progress: &dyn ImportProgress) {
        self.totals.scraped += 1;
        progress.on_phase(&format!("Saving {} works by {}", works.len(), composer));

        let result = match self.conn {
            Some(conn) => musicle_import::save_to_database(conn, works, progress),
            None => save_composer_works(WriteMode::DryRun, works, progress),
        };
        match result {
            Ok(stats) => {
                progress.on_complete(&format!(
                    "{composer}: {} new, {} rescanned, {} duplicates",
                    stats.works_created, stats.works_rescanned, stats.duplicates
                ));
                self.totals.stats.merge(&stats);
            }
            Err(e) => {
                log::error!(
                    "{} Failed to save {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    composer,
                    e,
                );
                self.totals.save_failed += 1;
            }
        }

        if let Some(dir) = self.export_dir {
            self.export(dir, composer, works);
        }
    }

    fn export(&mut self, dir: &Path, composer: &str, works: &[WorkRecord]) {
        let id = self.totals.exports.len();
        let Some(export) = ComposerExport::from_works(id, works) else {
            log::debug!("No works to export for {composer}");
            return;
        };
        match write_composer_export(dir, composer, &export) {
            Ok(path) => log::debug!("Exported {}", path.display()),
            Err(e) => log::warn!(
                "{} Failed to export {}: {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                composer,
                e,
            ),
        }
        self.totals.exports.push(export);
    }
}

/// Run the scrape command.
pub(crate) fn run_scrape(args: ScrapeArgs, quiet: bool) -> Result<(), CliError> {
    let config = ScraperConfig::load()?.with_overrides(args.list.composers, args.db);
    let scraper = Scraper::from_config(&config)?;

    let conn = if args.dry_run {
        log::info!(
            "{}",
            "Dry run: nothing will be written to the database"
                .if_supports_color(Stdout, |t| t.yellow()),
        );
        None
    } else {
        let path = config.database_path();
        log::info!(
            "Database: {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
        Some(musicle_db::open_database(&path)?)
    };

    if let Some(dir) = &args.export {
        std::fs::create_dir_all(dir)?;
    }

    let mut session = Session {
        conn: conn.as_ref(),
        export_dir: args.export.as_deref(),
        totals: RunTotals::default(),
    };
    let mut scrape_log = ScrapeLog::new();

    let outcome = match &args.composer {
        Some(composer) => scrape_single(&scraper, composer, &mut session, &mut scrape_log, quiet),
        None => scrape_all(
            &scraper,
            args.start_at.as_deref(),
            &mut session,
            &mut scrape_log,
            quiet,
        ),
    };
    if !args.no_log {
        write_scrape_log(&scrape_log);
    }
    outcome?;

    let full_run = args.composer.is_none() && args.start_at.is_none();
    if let Some(dir) = &args.export {
        if full_run && !session.totals.exports.is_empty() {
            let path = write_combined_export(dir, &session.totals.exports)?;
            log::info!(
                "{} Wrote {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                path.display(),
            );
        } else if !full_run {
            log::debug!("Skipping combined export for a partial run");
        }
    }

    print_summary(&session.totals, &scrape_log, args.dry_run);
    Ok(())
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn scrape_single(
    scraper: &Scraper,
    composer: &str,
    session: &mut Session<'_>,
    scrape_log: &mut ScrapeLog,
    quiet: bool,
) -> Result<(), CliError> {
    let pb = spinner(quiet, format!("Scraping {composer}..."));
    let works = match scraper.scrape_composer(composer, scrape_log) {
        Ok(works) => works,
        Err(e) => {
            pb.finish_and_clear();
            session.totals.failed += 1;
            return Err(e.into());
        }
    };
    session.save(composer, &works, &BarProgress { pb: &pb });
    pb.finish_and_clear();

    log::info!(
        "{} {} ({} works)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        composer.if_supports_color(Stdout, |t| t.bold()),
        works.len(),
    );
    Ok(())
}

fn scrape_all(
    scraper: &Scraper,
    start_at: Option<&str>,
    session: &mut Session<'_>,
    scrape_log: &mut ScrapeLog,
    quiet: bool,
) -> Result<(), CliError> {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(scraper.composers().len() as u64);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/dim} {pos}/{len} {msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        pb
    };

    scraper.scrape_all(start_at, scrape_log, |event| match event {
        ScrapeEvent::Started {
            index,
            total,
            composer,
        } => {
            pb.set_length(total as u64);
            pb.set_position(index as u64);
            pb.set_message(format!("Scraping {composer}..."));
        }
        ScrapeEvent::Completed {
            composer, works, ..
        } => {
            session.save(&composer, &works, &BarProgress { pb: &pb });
            pb.suspend(|| {
                log::info!(
                    "{} {} ({} works)",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    composer,
                    works.len(),
                );
            });
            pb.inc(1);
        }
        ScrapeEvent::Failed {
            composer, error, ..
        } => {
            session.totals.failed += 1;
            pb.suspend(|| {
                log::warn!(
                    "{} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    composer,
                    error,
                );
            });
            pb.inc(1);
        }
    })?;

    pb.finish_and_clear();
    Ok(())
}

fn log_file_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("scrape-{stamp}.log"))
}

fn write_scrape_log(scrape_log: &ScrapeLog) {
    let dir = default_log_dir();
    let path = log_file_path(&dir);
    let result = std::fs::create_dir_all(&dir).and_then(|()| scrape_log.write_to_file(&path));
    match result {
        Ok(()) => log::info!(
            "Scrape log: {}",
            path.display().if_supports_color(Stdout, |t| t.dimmed()),
        ),
        Err(e) => log::warn!(
            "{} Could not write scrape log {}: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            path.display(),
            e,
        ),
    }
}

fn print_summary(totals: &RunTotals, scrape_log: &ScrapeLog, dry_run: bool) {
    let summary = scrape_log.summary();

    log::info!("");
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Composers scraped: {}",
        totals.scraped.if_supports_color(Stdout, |t| t.green()),
    );
    if totals.failed > 0 {
        log::info!(
            "  Composers failed:  {}",
            totals.failed.if_supports_color(Stdout, |t| t.red()),
        );
    }
    log::info!("  Works found:       {}", totals.stats.total);
    log::info!("  Rows skipped:      {}", summary.rows_skipped);

    if dry_run {
        log::info!("  Works reported:    {}", totals.stats.reported);
        return;
    }

    log::info!("  Composers added:   {}", totals.stats.composers_created);
    log::info!(
        "  Works added:       {}",
        totals.stats.works_created.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Works rescanned:   {}", totals.stats.works_rescanned);
    if totals.stats.duplicates > 0 {
        log::info!(
            "  Duplicates:        {}",
            totals.stats.duplicates.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if totals.save_failed > 0 {
        log::info!(
            "  Save failures:     {}",
            totals.save_failed.if_supports_color(Stdout, |t| t.red()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_timestamped() {
        let path = log_file_path(Path::new("/tmp/logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("scrape-"));
        assert!(name.ends_with(".log"));
        // scrape-YYYYmmdd-HHMMSS.log
        assert_eq!(name.len(), "scrape-".len() + 15 + ".log".len());
        assert_eq!(path.parent(), Some(Path::new("/tmp/logs")));
    }

    #[test]
    fn dry_run_session_counts_reported_works() {
        let works = vec![WorkRecord::new(
            musicle_catalog::ComposerName::from_display("Maurice Ravel"),
            "Boléro",
            1928,
            "81",
            musicle_catalog::NO_OPUS_NUMBER,
        )];
        let mut session = Session {
            conn: None,
            export_dir: None,
            totals: RunTotals::default(),
        };
        session.save("Maurice Ravel", &works, &musicle_import::SilentProgress);
        assert_eq!(session.totals.scraped, 1);
        assert_eq!(session.totals.stats.reported, 1);
        assert_eq!(session.totals.stats.works_created, 0);
    }

    #[test]
    fn write_session_saves_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let conn = musicle_db::open_memory().unwrap();
        let works = vec![
            WorkRecord::new(
                musicle_catalog::ComposerName::from_display("Maurice Ravel"),
                "Boléro",
                1928,
                "81",
                musicle_catalog::NO_OPUS_NUMBER,
            ),
            WorkRecord::new(
                musicle_catalog::ComposerName::from_display("Maurice Ravel"),
                "Pavane pour une infante défunte",
                1899,
                "19",
                musicle_catalog::NO_OPUS_NUMBER,
            ),
        ];
        let mut session = Session {
            conn: Some(&conn),
            export_dir: Some(dir.path()),
            totals: RunTotals::default(),
        };
        session.save("Maurice Ravel", &works, &musicle_import::SilentProgress);
        session.save("Maurice Ravel", &works, &musicle_import::SilentProgress);

        assert_eq!(session.totals.stats.composers_created, 1);
        assert_eq!(session.totals.stats.works_created, 2);
        assert_eq!(session.totals.stats.works_rescanned, 2);
        assert_eq!(session.totals.exports.len(), 2);
        assert_eq!(session.totals.exports[0].id, 0);
        assert_eq!(session.totals.exports[1].id, 1);
    }
}
