//! User API E2E Test Suite
//!
//! This crate drives a running user management server over HTTP and checks
//! its `/api/users` contract:
//! - Builds a per-run context (base URL + random run token) exactly once
//! - Issues `GET`/`POST` calls through a thin reqwest client
//! - Runs five ordered scenarios, isolating failures per scenario
//! - Reports per-scenario diagnostics and a JSON results file
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  User API Test Runner (Rust)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── setup() -> (TestContext, UsersClient)                │
//! │    ├── run_scenarios(&[Scenario]) -> TestSuiteResult        │
//! │    └── write_results(&TestSuiteResult) -> PathBuf           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (priority order)                                  │
//! │    1. list_users_status          GET  -> 200, body          │
//! │    2. create_user_status         POST -> 201, body          │
//! │    3. list_users_content_type    GET  -> application/json   │
//! │    4. create_user_echoes_name    POST -> body has name      │
//! │    5. list_users_after_creation  POST + GET -> JSON array   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod checks;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod runner;
pub mod scenario;

pub use client::{ApiResponse, UsersClient};
pub use config::{RunnerConfig, TargetConfig};
pub use context::{RunToken, TestContext, UserPayload};
pub use error::{E2eError, E2eResult};
pub use runner::{Outcome, TestResult, TestRunner, TestSuiteResult};
pub use scenario::Scenario;
