//! Assertions on captured responses
//!
//! Each check returns `Err(E2eError)` on mismatch so a scenario can bail out
//! with `?` and the runner records the failure without stopping the run.

use crate::client::ApiResponse;
use crate::error::{E2eError, E2eResult};

pub fn expect_status(
    response: &ApiResponse,
    method: &'static str,
    endpoint: &str,
    expected: u16,
) -> E2eResult<()> {
    if response.status == expected {
        return Ok(());
    }
    Err(E2eError::StatusMismatch {
        method,
        endpoint: endpoint.to_string(),
        expected,
        actual: response.status,
    })
}

/// A transport payload was received. An empty JSON array counts as present.
pub fn expect_body_present(response: &ApiResponse, what: &str) -> E2eResult<()> {
    if response.body.is_empty() {
        return Err(E2eError::AssertionFailed(format!(
            "{} should return a response body",
            what
        )));
    }
    Ok(())
}

/// Exact header match; `application/json; charset=utf-8` does not pass.
pub fn expect_content_type(response: &ApiResponse, expected: &str) -> E2eResult<()> {
    match response.content_type.as_deref() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(E2eError::AssertionFailed(format!(
            "content type should be {:?}, got {:?}",
            expected, actual
        ))),
        None => Err(E2eError::AssertionFailed(format!(
            "content type should be {:?}, header missing",
            expected
        ))),
    }
}

pub fn expect_body_contains(response: &ApiResponse, needle: &str) -> E2eResult<()> {
    if response.body.contains(needle) {
        return Ok(());
    }
    Err(E2eError::AssertionFailed(format!(
        "response body should contain {:?}",
        needle
    )))
}

/// First non-whitespace character of the body is `[`.
pub fn expect_array_prefix(response: &ApiResponse) -> E2eResult<()> {
    if response.body.trim_start().starts_with('[') {
        return Ok(());
    }
    Err(E2eError::AssertionFailed(
        "response body should be a JSON array".to_string(),
    ))
}
