use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::{DEFAULT_PAGES_LIMIT, DEFAULT_TREND_SOURCE, DEFAULT_USER_AGENT};
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub trends: TrendsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub user_agent: String,
    pub pages_limit: usize,
    /// Per-request timeout. Absent means requests may take as long as the server does.
    pub timeout_seconds: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pages_limit: DEFAULT_PAGES_LIMIT,
            timeout_seconds: None,
        }
    }
}

impl CrawlerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    pub source: String,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_TREND_SOURCE.to_string(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`, falling back to defaults when it doesn't exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.crawler.pages_limit == 0 {
            return Err(ScraperError::Config(
                "crawler.pages_limit must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.crawler.pages_limit, DEFAULT_PAGES_LIMIT);
        assert_eq!(config.crawler.user_agent, DEFAULT_USER_AGENT);
        assert!(config.crawler.timeout().is_none());
        assert_eq!(config.trends.source, DEFAULT_TREND_SOURCE);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[crawler]\npages_limit = 5\ntimeout_seconds = 12").unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.crawler.pages_limit, 5);
        assert_eq!(config.crawler.timeout(), Some(Duration::from_secs(12)));
        assert_eq!(config.crawler.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.trends.source, DEFAULT_TREND_SOURCE);
    }

    #[test]
    fn zero_page_budget_is_rejected() {
        let err = Config::from_toml("[crawler]\npages_limit = 0").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = Config::from_toml("[crawler\npages_limit = 2").unwrap_err();
        assert!(matches!(err, ScraperError::Toml(_)));
    }
}
