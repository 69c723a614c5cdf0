use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

const SYSTEM_CONFIG_PATH: &str = "/etc/linkedin_crawler/config.toml";
const DEFAULT_CONFIG_PATH: &str = "configs/config.toml";
const ENV_PREFIX: &str = "CRAWLER";

pub const GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google caps a single Custom Search page at 10 items.
const MAX_SEARCH_RESULTS: u8 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub google_search: GoogleSearchSettings,
    pub spider: SpiderSettings,
    pub crawl: CrawlSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleSearchSettings {
    pub api_key: String,
    pub search_engine_id: String,
    pub base_url: String,
    pub num_results: u8,
}

impl Default for GoogleSearchSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_engine_id: String::new(),
            base_url: GOOGLE_SEARCH_URL.to_string(),
            num_results: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpiderSettings {
    pub api_key: String,
    pub concurrency: usize,
}

impl Default for SpiderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            concurrency: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlSettings {
    /// Also fetch `/company/<slug>/life` for every company page.
    pub include_life: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    /// Append logs here instead of stderr.
    pub file_path: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("{key} not found; set {env} or add it to config.toml")]
    Missing { key: &'static str, env: &'static str },
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Settings {
    /// Layered load: system file, project (or explicit) file, `CRAWLER_*`
    /// environment, then the bare credential variables.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let project_file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false),
        };

        let cfg = Config::builder()
            .add_source(File::new(SYSTEM_CONFIG_PATH, FileFormat::Toml).required(false))
            .add_source(project_file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("google_search.api_key", env_var("GOOGLE_SEARCH_API_KEY"))?
            .set_override_option(
                "google_search.search_engine_id",
                env_var("GOOGLE_SEARCH_ENGINE_ID"),
            )?
            .set_override_option("spider.api_key", env_var("SPIDER_API_KEY"))?
            .build()?;

        Self::from_config(cfg)
    }

    pub fn from_config(cfg: Config) -> Result<Self, SettingsError> {
        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.google_search.api_key.trim().is_empty() {
            return Err(SettingsError::Missing {
                key: "google_search.api_key",
                env: "GOOGLE_SEARCH_API_KEY",
            });
        }
        if self.google_search.search_engine_id.trim().is_empty() {
            return Err(SettingsError::Missing {
                key: "google_search.search_engine_id",
                env: "GOOGLE_SEARCH_ENGINE_ID",
            });
        }
        if self.spider.api_key.trim().is_empty() {
            return Err(SettingsError::Missing {
                key: "spider.api_key",
                env: "SPIDER_API_KEY",
            });
        }
        if !(1..=MAX_SEARCH_RESULTS).contains(&self.google_search.num_results) {
            return Err(SettingsError::Invalid {
                key: "google_search.num_results",
                reason: format!("must be between 1 and {}", MAX_SEARCH_RESULTS),
            });
        }
        if self.spider.concurrency == 0 {
            return Err(SettingsError::Invalid {
                key: "spider.concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
