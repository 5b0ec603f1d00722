use crate::error::{DeskError, Result};
use crate::pagination::PageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys accepted by `salesdesk config`.
pub const CONFIG_KEYS: [&str; 3] = ["base-url", "page-size", "timeout-secs"];

/// Configuration for salesdesk, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeskConfig {
    /// Root of the REST backend, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rows per table page. Out-of-range values are clamped on load.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    PageSize::default().get()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: DeskConfig = serde_json::from_str(&content)?;
        config.page_size = PageSize::nearest(config.page_size).get();
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::nearest(self.page_size)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "base-url" => Ok(self.base_url.clone()),
            "page-size" => Ok(self.page_size.to_string()),
            "timeout-secs" => Ok(self.timeout_secs.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets a key from its textual value, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-url" => self.set_base_url(value),
            "page-size" => {
                let size = value
                    .parse::<usize>()
                    .map_err(|_| DeskError::Config(format!("Invalid page size: {}", value)))?;
                self.page_size = PageSize::new(size)?.get();
                Ok(())
            }
            "timeout-secs" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| DeskError::Config(format!("Invalid timeout: {}", value)))?;
                self.timeout_secs = secs;
                Ok(())
            }
            other => Err(unknown_key(other)),
        }
    }

    /// Set the backend URL (must be http or https; trailing slashes are dropped)
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DeskError::Config(format!(
                "Base URL must start with http:// or https://: {}",
                url
            )));
        }
        self.base_url = url.to_string();
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(String, String)> {
        CONFIG_KEYS
            .iter()
            .map(|k| (k.to_string(), self.get(k).unwrap_or_default()))
            .collect()
    }
}

fn unknown_key(key: &str) -> DeskError {
    DeskError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
