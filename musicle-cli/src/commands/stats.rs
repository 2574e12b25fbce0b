use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use musicle_scraper::ScraperConfig;

use crate::error::CliError;

/// Show what the works database holds.
pub(crate) fn run_stats(db: Option<PathBuf>) -> Result<(), CliError> {
    let config = ScraperConfig::load()?.with_overrides(None, db);
    let path = config.database_path();
    if !path.exists() {
        log::warn!(
            "{} No database at {}. Run 'musicle scrape' first.",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            path.display(),
        );
        return Ok(());
    }

    let conn = musicle_db::open_database(&path)?;
    let stats = musicle_db::catalog_stats(&conn)?;

    log::info!(
        "{}",
        "Works Database".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Path:      {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Composers: {}", stats.composers);
    log::info!("  Works:     {}", stats.works);
    if let (Some(earliest), Some(latest)) = (stats.earliest_year, stats.latest_year) {
        log::info!("  Years:     {earliest} to {latest}");
    }
    if let Some(scanned) = &stats.last_scanned {
        log::info!("  Last scan: {scanned}");
    }

    let composers = musicle_db::list_composers(&conn)?;
    if !composers.is_empty() {
        log::info!("");
        for composer in composers {
            log::info!(
                "  {:<32} {}",
                composer.full_name,
                composer.works.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    Ok(())
}
