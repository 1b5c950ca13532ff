//! HTTP client for the `/api/users` endpoint

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{TargetConfig, USERS_ENDPOINT};
use crate::context::UserPayload;
use crate::error::{E2eError, E2eResult};

const APPLICATION_JSON: &str = "application/json";

/// What came back from one call, captured for immediate assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    /// Raw `Content-Type` header value, if the server sent one
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    /// Number of elements when the body is a top-level JSON array
    pub fn json_array_len(&self) -> E2eResult<usize> {
        match serde_json::from_str::<serde_json::Value>(&self.body)? {
            serde_json::Value::Array(items) => Ok(items.len()),
            other => Err(E2eError::AssertionFailed(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Thin wrapper over reqwest bound to one server
pub struct UsersClient {
    http: reqwest::Client,
    users_url: String,
}

impl UsersClient {
    pub fn new(target: &TargetConfig) -> E2eResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = target.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            users_url: target.users_url(),
        })
    }

    /// Endpoint path used in diagnostics
    pub fn endpoint(&self) -> &'static str {
        USERS_ENDPOINT
    }

    /// `GET /api/users`
    pub async fn list_users(&self) -> E2eResult<ApiResponse> {
        debug!("GET {}", self.users_url);
        let response = self
            .http
            .get(&self.users_url)
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
            .send()
            .await?;
        Self::capture(response).await
    }

    /// `POST /api/users` with the payload as a JSON body
    pub async fn create_user(&self, payload: &UserPayload) -> E2eResult<ApiResponse> {
        debug!("POST {} ({})", self.users_url, payload.email);
        let response = self.http.post(&self.users_url).json(payload).send().await?;
        Self::capture(response).await
    }

    async fn capture(response: reqwest::Response) -> E2eResult<ApiResponse> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}
