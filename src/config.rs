//! Configuration management for ReviewTUI
//!
//! Config is read once at startup from ~/.config/reviewtui/config.toml
//! (or the path given with `--config`) and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::api::cms::DEFAULT_BASE_URL;
use crate::models::SortOrder;

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "REVIEWTUI_API_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Content API host, e.g. "https://cms.example.com"
    pub api_base_url: Option<String>,
    /// Initial rating order for every list
    pub default_sort: Option<SortOrder>,
    /// Where the interactive UI writes its log
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/reviewtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reviewtui").join("config.toml"))
    }

    /// Load from the given path, or the default location, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::path) {
            Some(p) => p,
            None => return Self::default(),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse TOML config text
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Resolve the API base URL: flag, then environment, then file, then default
    pub fn base_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(flag, env.as_deref(), self.api_base_url.as_deref())
    }

    pub fn sort(&self) -> SortOrder {
        self.default_sort.unwrap_or_default()
    }

    /// Log file for the interactive UI
    pub fn log_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.log_file.clone())
            .or_else(|| dirs::data_local_dir().map(|p| p.join("reviewtui").join("reviewtui.log")))
    }
}

fn resolve_base_url(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_base_url.is_none());
        assert_eq!(config.sort(), SortOrder::Default);
    }

    #[test]
    fn test_parse_config() {
        let config = Config::parse(
            r#"
            api_base_url = "http://localhost:1337/"
            default_sort = "highest"
            log_file = "/tmp/reviewtui.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:1337/"));
        assert_eq!(config.sort(), SortOrder::HighestFirst);
        assert_eq!(config.log_path(None), Some(PathBuf::from("/tmp/reviewtui.log")));
    }

    #[test]
    fn test_parse_rejects_unknown_sort() {
        assert!(Config::parse(r#"default_sort = "sideways""#).is_err());
    }

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            resolve_base_url(Some("http://flag/"), Some("http://env"), Some("http://file")),
            "http://flag"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://env"), Some("http://file")),
            "http://env"
        );
        assert_eq!(resolve_base_url(None, Some("  "), Some("http://file")), "http://file");
        assert_eq!(resolve_base_url(None, None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load(Some(Path::new("/nonexistent/reviewtui/config.toml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_log_path_flag_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/var/log/a.log")),
            ..Config::default()
        };
        assert_eq!(
            config.log_path(Some(Path::new("/tmp/b.log"))),
            Some(PathBuf::from("/tmp/b.log"))
        );
    }
}
