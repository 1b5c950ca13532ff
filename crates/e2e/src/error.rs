//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Suite setup failed: {0}")]
    Setup(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("{method} {endpoint} returned status {actual}, expected {expected}")]
    StatusMismatch {
        method: &'static str,
        endpoint: String,
        expected: u16,
        actual: u16,
    },

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl E2eError {
    /// True for connection, DNS and timeout failures rather than assertion mismatches.
    /// Client builder errors are configuration mistakes and do not count.
    pub fn is_transport(&self) -> bool {
        match self {
            E2eError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
