use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Default base URL for the GitLab API
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com/api/v3";

/// User-Agent sent with every outbound request
pub const USER_AGENT: &str = "npm-gitlab-proxy";

/// Default address the HTTP server binds to
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Deadline for a single GitLab API call in milliseconds (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Connect deadline for every outbound call in milliseconds (10 seconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Longest silence between two body chunks of an archive download in
/// milliseconds (30 seconds)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Proxy configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Base URL of the GitLab API, e.g. `https://gitlab.example.com/api/v3`
    pub gitlab_url: String,
    /// Socket address to listen on
    pub listen: String,
    /// Externally visible base URL used in tarball links
    pub public_url: Option<String>,
    /// Token used when the client does not send one
    pub default_token: Option<String>,
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

/// Deadlines applied to outbound HTTP calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Whole-call deadline of a JSON API request
    pub request: Duration,
    pub connect: Duration,
    /// Idle deadline between reads; bounds archive bodies of any size
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            connect: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            gitlab_url: DEFAULT_GITLAB_URL.to_string(),
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            public_url: None,
            default_token: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl ProxyConfig {
    /// Loads configuration from a JSON file. Missing fields use defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// GitLab base URL without a trailing slash
    pub fn gitlab_base_url(&self) -> &str {
        self.gitlab_url.trim_end_matches('/')
    }

    /// Public base URL without a trailing slash, if configured
    pub fn public_base_url(&self) -> Option<&str> {
        self.public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            request: Duration::from_millis(self.request_timeout_ms),
            connect: Duration::from_millis(self.connect_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
        }
    }
}
