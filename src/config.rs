use std::{env, time::Duration};

use agrolead_content::HttpContentConfig;
use agrolead_shared::Locale;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_bot_timeout_secs")]
    pub bot_timeout_secs: u64,
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn bot_timeout(&self) -> Duration {
        Duration::from_secs(self.bot_timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_bot_timeout_secs() -> u64 {
    5
}

/// Headless CMS. Disabled while `base_url` is empty.
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            token: None,
            revalidate_secs: default_revalidate_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl ContentConfig {
    pub fn is_enabled(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    pub fn http(&self) -> HttpContentConfig {
        HttpContentConfig {
            base_url: self.base_url.to_owned(),
            dataset: self.dataset.to_owned(),
            api_version: self.api_version.to_owned(),
            token: self.token.clone().filter(|t| !t.is_empty()),
        }
    }
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_revalidate_secs() -> u64 {
    60
}

fn default_cache_capacity() -> usize {
    agrolead_content::DEFAULT_CACHE_CAPACITY
}

#[derive(Debug, Deserialize, Clone)]
pub struct I18nConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
        }
    }
}

impl I18nConfig {
    pub fn locale(&self) -> Locale {
        self.default_locale.parse().unwrap_or_default()
    }
}

fn default_locale() -> String {
    "fr".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AGROLEAD__SUBMISSION__ENDPOINT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("submission.endpoint", "")?
            .set_default("submission.timeout_secs", default_timeout_secs())?
            .set_default("submission.bot_timeout_secs", default_bot_timeout_secs())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("AGROLEAD")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.submission.endpoint.trim().is_empty() {
            return Err("Submission endpoint must be set".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.submission.timeout_secs == 0 {
            return Err("Submission timeout must be greater than 0".to_string());
        }
        if self.i18n.default_locale.parse::<Locale>().is_err() {
            return Err(format!(
                "Unsupported default locale: {}",
                self.i18n.default_locale
            ));
        }
        Ok(())
    }
}
