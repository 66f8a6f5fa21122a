use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::integrations::dirble_api::DEFAULT_BASE_URL;

const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api: ApiConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_ms: DEFAULT_API_TIMEOUT_MS,
            },
        }
    }
}

/// On-disk shape; every key is optional and unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api: FileApiConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileApiConfig {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
}

impl RuntimeConfig {
    /// Defaults plus environment overrides. No file is consulted.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.merge_env()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        config.merge_env()?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config file: {}", path.display()))?;
        self.merge_toml_text(&content)
            .with_context(|| format!("failed parsing config TOML: {}", path.display()))
    }

    fn merge_toml_text(&mut self, content: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(content)?;

        if let Some(base_url) = file.api.base_url.and_then(non_empty) {
            self.api.base_url = base_url;
        }
        if let Some(timeout_ms) = file.api.timeout_ms {
            self.api.timeout_ms = timeout_ms;
        }

        Ok(())
    }

    fn merge_env(&mut self) -> Result<()> {
        if let Some(base_url) = env::var("DIRBLE_API_BASE").ok().and_then(non_empty) {
            self.api.base_url = base_url;
        }
        if let Ok(timeout_ms) = env::var("DIRBLE_API_TIMEOUT_MS") {
            self.api.timeout_ms = timeout_ms
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid DIRBLE_API_TIMEOUT_MS '{timeout_ms}'"))?;
        }

        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
