use std::path::PathBuf;

use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://imslp.org/wiki/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "MUSICLE_BASE_URL";
const ENV_USER_AGENT: &str = "MUSICLE_USER_AGENT";
const ENV_TIMEOUT_SECS: &str = "MUSICLE_TIMEOUT_SECS";
const ENV_COMPOSERS_FILE: &str = "MUSICLE_COMPOSERS_FILE";
const ENV_DATABASE: &str = "MUSICLE_DATABASE";

fn default_user_agent() -> String {
    format!("musicle/{}", env!("CARGO_PKG_VERSION"))
}

/// Resolved scraper settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Wiki root that catalog page names are appended to.
    pub base_url: String,
    pub user_agent: String,
    /// Page fetch timeout. Fetching has no retries, so this bounds a composer.
    pub timeout_secs: u64,
    /// Composer universe list to use instead of the embedded one.
    pub composers_file: Option<PathBuf>,
    /// Database path for write-mode runs.
    pub database: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            composers_file: None,
            database: None,
        }
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub user_agent: ConfigSource,
    pub timeout_secs: ConfigSource,
    pub composers_file: ConfigSource,
    pub database: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    scraper: Option<ScraperSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ScraperSection {
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
    composers_file: Option<PathBuf>,
    database: Option<PathBuf>,
}

impl ScraperConfig {
    /// Load settings from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, ScrapeError> {
        let file = load_config_file().unwrap_or_default();
        let defaults = Self::default();

        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        let user_agent = std::env::var(ENV_USER_AGENT)
            .ok()
            .or(file.user_agent)
            .unwrap_or(defaults.user_agent);

        let timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
            Ok(v) => v.trim().parse().map_err(|_| {
                ScrapeError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{v}'"
                ))
            })?,
            Err(_) => file.timeout_secs.unwrap_or(defaults.timeout_secs),
        };
        if timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        let composers_file = std::env::var(ENV_COMPOSERS_FILE)
            .ok()
            .map(PathBuf::from)
            .or(file.composers_file);

        let database = std::env::var(ENV_DATABASE)
            .ok()
            .map(PathBuf::from)
            .or(file.database);

        Ok(Self {
            base_url,
            user_agent,
            timeout_secs,
            composers_file,
            database,
        })
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        composers_file: Option<PathBuf>,
        database: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = composers_file {
            self.composers_file = Some(path);
        }
        if let Some(path) = database {
            self.database = Some(path);
        }
        self
    }

    /// Database path, falling back to `<cache_dir>/musicle/musicle.db`.
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("musicle").join("config.toml"))
}

/// Default database location under the user cache directory.
pub fn default_database_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("musicle")
        .join("musicle.db")
}

/// Directory for scrape log files under the user cache directory.
pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("musicle")
        .join("logs")
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let file = load_config_file().unwrap_or_default();

    let source = |var: &'static str, in_file: bool, default: ConfigSource| {
        if std::env::var(var).is_ok() {
            ConfigSource::EnvVar(var)
        } else if in_file {
            ConfigSource::ConfigFile
        } else {
            default
        }
    };

    ConfigSources {
        base_url: source(ENV_BASE_URL, file.base_url.is_some(), ConfigSource::Default),
        user_agent: source(ENV_USER_AGENT, file.user_agent.is_some(), ConfigSource::Default),
        timeout_secs: source(
            ENV_TIMEOUT_SECS,
            file.timeout_secs.is_some(),
            ConfigSource::Default,
        ),
        composers_file: source(
            ENV_COMPOSERS_FILE,
            file.composers_file.is_some(),
            ConfigSource::Missing,
        ),
        database: source(ENV_DATABASE, file.database.is_some(), ConfigSource::Default),
    }
}

fn load_config_file() -> Option<ScraperSection> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<ScraperSection> {
    match toml::from_str::<ConfigFile>(content) {
        Ok(config) => config.scraper,
        Err(e) => {
            log::warn!("Ignoring malformed config file: {e}");
            None
        }
    }
}
