mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_show};
use commands::list::run_list;
use commands::scrape::run_scrape;
use commands::stats::run_stats;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Scrape(args) => run_scrape(args, cli.quiet),
        Commands::List { list } => run_list(list),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
        Commands::Stats { db } => run_stats(db),
    };

    if let Err(e) = result {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
