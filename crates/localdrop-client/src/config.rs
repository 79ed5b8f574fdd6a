//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration.

use std::path::PathBuf;

use directories::UserDirs;
use localdrop_shared::constants::DEFAULT_TIMESTAMP_FORMAT;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Database file.
    /// Env: `LOCALDROP_DB_PATH`
    /// Default: `None` (platform data directory).
    pub db_path: Option<PathBuf>,

    /// Page URL invite links are derived from.
    /// Env: `LOCALDROP_PAGE_URL`
    /// Default: `http://localhost:8080/`
    pub page_url: String,

    /// Where downloaded images are written.
    /// Env: `LOCALDROP_DOWNLOAD_DIR`
    /// Default: the user's download directory, else `.`
    pub download_dir: PathBuf,

    /// chrono format string for chat timestamps.
    /// Env: `LOCALDROP_TIMESTAMP_FORMAT`
    pub timestamp_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            page_url: "http://localhost:8080/".to_string(),
            download_dir: UserDirs::new()
                .and_then(|dirs| dirs.download_dir().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(".")),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("LOCALDROP_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(url) = lookup("LOCALDROP_PAGE_URL") {
            if url.contains("://") {
                config.page_url = url;
            } else {
                tracing::warn!(value = %url, "Invalid LOCALDROP_PAGE_URL, using default");
            }
        }

        if let Some(dir) = lookup("LOCALDROP_DOWNLOAD_DIR").filter(|d| !d.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }

        if let Some(format) = lookup("LOCALDROP_TIMESTAMP_FORMAT") {
            if is_valid_timestamp_format(&format) {
                config.timestamp_format = format;
            } else {
                tracing::warn!(
                    value = %format,
                    "Invalid LOCALDROP_TIMESTAMP_FORMAT, using default"
                );
            }
        }

        config
    }
}

fn is_valid_timestamp_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, None);
        assert_eq!(config.page_url, "http://localhost:8080/");
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("LOCALDROP_DB_PATH", "/tmp/ld.db"),
            ("LOCALDROP_PAGE_URL", "https://share.example/room"),
            ("LOCALDROP_DOWNLOAD_DIR", "/tmp/dl"),
            ("LOCALDROP_TIMESTAMP_FORMAT", "%H:%M"),
        ]));
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/ld.db")));
        assert_eq!(config.page_url, "https://share.example/room");
        assert_eq!(config.download_dir, PathBuf::from("/tmp/dl"));
        assert_eq!(config.timestamp_format, "%H:%M");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("LOCALDROP_PAGE_URL", "not a url"),
            ("LOCALDROP_TIMESTAMP_FORMAT", "%H %"),
        ]));
        assert_eq!(config.page_url, "http://localhost:8080/");
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }
}
