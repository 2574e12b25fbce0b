use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use musicle_scraper::{ConfigSource, ScraperConfig};

use crate::error::CliError;

/// Show current settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = musicle_scraper::config_path();
    let sources = musicle_scraper::config_sources();
    let config = ScraperConfig::load()?;

    log::info!(
        "{}",
        "Scraper Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let composers_file = config
        .composers_file
        .as_ref()
        .map(|p| p.display().to_string());
    let fields: &[(&str, &ConfigSource, Option<String>)] = &[
        ("base_url", &sources.base_url, Some(config.base_url.clone())),
        ("user_agent", &sources.user_agent, Some(config.user_agent.clone())),
        (
            "timeout_secs",
            &sources.timeout_secs,
            Some(config.timeout_secs.to_string()),
        ),
        ("composers_file", &sources.composers_file, composers_file),
        (
            "database",
            &sources.database,
            Some(config.database_path().display().to_string()),
        ),
    ];

    for (name, source, value) in fields {
        let display_value = value.as_deref().unwrap_or("(embedded list)");
        log::info!(
            "  {:<16} {} {}",
            format!("{name}:"),
            display_value,
            format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    match musicle_scraper::config_path() {
        Some(p) => log::info!("{}", p.display()),
        None => log::error!("Could not determine config directory"),
    }
}
