use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use musicle_catalog::ComposerList;
use musicle_scraper::{ComposerRegistry, ScraperConfig};

use crate::cli_types::ComposerListArgs;
use crate::error::CliError;

pub(crate) fn run_list(args: ComposerListArgs) -> Result<(), CliError> {
    let config = ScraperConfig::load()?.with_overrides(args.composers, None);
    let composers = match &config.composers_file {
        Some(path) => ComposerList::load(path)?,
        None => ComposerList::embedded(),
    };
    let registry = ComposerRegistry::builtin();

    log::info!(
        "{} ({}):",
        "Scrapeable composers".if_supports_color(Stdout, |t| t.bold()),
        composers.len(),
    );
    log::info!("");

    for composer in composers.iter() {
        let capabilities = registry.get(composer).capabilities();
        if capabilities.is_empty() {
            log::info!("  {}", composer);
        } else {
            log::info!(
                "  {} [{}]",
                composer.if_supports_color(Stdout, |t| t.bold()),
                capabilities
                    .join(", ")
                    .if_supports_color(Stdout, |t| t.cyan()),
            );
        }
    }
    Ok(())
}
