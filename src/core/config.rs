use crate::core::history::{DEFAULT_DATE_FORMAT, is_valid_date_format};
use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate: Some(ExchangeRateProviderConfig {
                base_url: "https://api.exchangerate-api.com".to_string(),
            }),
        }
    }
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "BRL".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_from")]
    pub default_from: String,
    #[serde(default = "default_to")]
    pub default_to: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            default_from: default_from(),
            default_to: default_to(),
            request_timeout_secs: default_request_timeout_secs(),
            date_format: default_date_format(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// when no config file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn exchange_rate_base_url(&self) -> &str {
        self.providers
            .exchange_rate
            .as_ref()
            .map_or("https://api.exchangerate-api.com", |p| &p.base_url)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        ensure!(
            is_valid_date_format(&config.date_format),
            "Invalid date_format {:?} in config file: {}",
            config.date_format,
            path.as_ref().display()
        );
        debug!("Successfully loaded config");
        Ok(config)
    }
}
