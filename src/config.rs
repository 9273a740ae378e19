/// Configuration for the admin console.
/// Holds the API endpoint, timing knobs and the local config directory.

use crate::error::{AdminError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Production admin API, used when neither `--api-url` nor `HUB_API_URL` is set.
pub const DEFAULT_API_URL: &str = "https://api.africanmarkethub.ca/api/v1/admin";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Name of the SQLite file holding the auth token inside the config directory.
pub const TOKEN_DB_FILE: &str = "admin.db";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub poll_interval: Duration,
    pub debounce_window: Duration,
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Build a config for the given API URL, validating it and stripping any trailing slash.
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        let parsed = Url::parse(api_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AdminError::Config(format!(
                "unsupported scheme '{}' in API URL",
                parsed.scheme()
            )));
        }

        Ok(ClientConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }

    pub fn poll_interval_ms(mut self, millis: u64) -> Self {
        self.poll_interval = Duration::from_millis(millis);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Resolve the config directory: an explicit path wins, otherwise `~/.hubadmin`.
pub fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| AdminError::Config("Failed to get home directory".to_string()))?;
    Ok(base_dirs.home_dir().join(".hubadmin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_millis(5000));
        assert_eq!(config.debounce_window, Duration::from_millis(300));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_api_url_trailing_slash_stripped() {
        let config = ClientConfig::with_api_url("http://localhost:8000/api/v1/admin/").unwrap();
        assert_eq!(config.api_url, "http://localhost:8000/api/v1/admin");
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        assert!(ClientConfig::with_api_url("localhost").is_err());
        assert!(ClientConfig::with_api_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::with_api_url("http://127.0.0.1:9000")
            .unwrap()
            .poll_interval_ms(250)
            .page_size(50);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let dir = resolve_config_dir(Some(Path::new("/tmp/hub"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/hub"));
    }
}
