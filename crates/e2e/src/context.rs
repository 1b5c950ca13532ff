//! Per-run test context and the user payloads built from it

use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TargetConfig;
use crate::error::{E2eError, E2eResult};

/// Uniqueness token embedded in generated emails, fixed for one suite run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunToken(String);

impl RunToken {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Use a caller-chosen token. Must be usable inside an email local part.
    pub fn from_string(token: impl Into<String>) -> E2eResult<Self> {
        let token = token.into();
        let valid = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(E2eError::Setup(format!("invalid run token: {:?}", token)));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only state shared by every scenario in a run
#[derive(Debug, Clone)]
pub struct TestContext {
    target: TargetConfig,
    token: RunToken,
}

impl TestContext {
    /// Build the context once, before the first scenario
    pub fn new(target: TargetConfig) -> E2eResult<Self> {
        Self::with_token(target, RunToken::generate())
    }

    pub fn with_token(target: TargetConfig, token: RunToken) -> E2eResult<Self> {
        let url = Url::parse(target.base_url()).map_err(|e| {
            E2eError::Setup(format!("invalid base URL {:?}: {}", target.base_url(), e))
        })?;
        let has_host = url.host_str().map_or(false, |h| !h.is_empty());
        if !matches!(url.scheme(), "http" | "https") || !has_host {
            return Err(E2eError::Setup(format!(
                "base URL must be an http(s) address, got {:?}",
                target.base_url()
            )));
        }
        Ok(Self { target, token })
    }

    pub fn target(&self) -> &TargetConfig {
        &self.target
    }

    pub fn token(&self) -> &RunToken {
        &self.token
    }

    /// Payload for a user whose email is unique to this run
    pub fn user(&self, name: &str, local_part: &str) -> UserPayload {
        UserPayload::for_run(name, local_part, &self.token)
    }
}

/// JSON body sent to the creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    /// `<local_part>.<token>@example.com`
    pub fn for_run(name: &str, local_part: &str, token: &RunToken) -> Self {
        Self {
            name: name.to_string(),
            email: format!("{}.{}@example.com", local_part, token),
        }
    }
}
