//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "musicle")]
#[command(about = "Scrape composer works catalogs into the musicle database", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the composer universe list comes from.
#[derive(Args, Clone)]
pub(crate) struct ComposerListArgs {
    /// JSON file with the list of composer names (default: built-in list)
    #[arg(long)]
    pub composers: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub(crate) struct ScrapeArgs {
    /// Only scrape this composer
    #[arg(long, conflicts_with = "start_at")]
    pub composer: Option<String>,

    /// Start at this composer in the list
    #[arg(long)]
    pub start_at: Option<String>,

    /// Show what would be saved without writing to the database
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Database path (default: <cache>/musicle/musicle.db)
    #[arg(long)]
    pub db: Option<PathBuf>,

    #[command(flatten)]
    pub list: ComposerListArgs,

    /// Write JSON exports for the puzzle app into this directory
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Disable scrape log file
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scrape composer catalog pages and save their works
    Scrape(ScrapeArgs),

    /// List scrapeable composers and their configured overrides
    List {
        #[command(flatten)]
        list: ComposerListArgs,
    },

    /// Show scraper configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show database statistics
    Stats {
        /// Database path (default: <cache>/musicle/musicle.db)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}
