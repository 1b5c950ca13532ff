//! Target configuration - where the user API lives and how to talk to it

use std::path::PathBuf;
use std::time::Duration;

/// Default address of the user API under test
pub const DEFAULT_BASE_URL: &str = "http://localhost:9001";

/// Path of the users collection endpoint
pub const USERS_ENDPOINT: &str = "/api/users";

/// Configuration for reaching the server under test
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Scheme, host and port of the server (no path)
    base_url: String,

    /// Per-request timeout (None = reqwest default)
    request_timeout: Option<Duration>,
}

impl TargetConfig {
    /// Build a config for the given base URL, dropping any trailing slashes
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            request_timeout: None,
        }
    }

    /// Bound each request instead of relying on the client default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Full URL of the users endpoint
    pub fn users_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_ENDPOINT)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub target: TargetConfig,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
