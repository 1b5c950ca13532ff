//! Main test runner that sets up the run and executes scenarios in order

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::client::UsersClient;
use crate::config::RunnerConfig;
use crate::context::{RunToken, TestContext};
use crate::error::{E2eError, E2eResult};
use crate::scenario::Scenario;

/// How a single scenario ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    /// Never ran because suite setup failed
    Errored,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub priority: u8,
    pub description: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
    pub diagnostics: Vec<String>,
    pub error: Option<String>,
    /// Set when the failure came from the network rather than an assertion
    pub transport_failure: bool,
}

impl TestResult {
    pub fn success(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Result of running all scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub run_token: Option<String>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Sequential runner for the user API scenarios
pub struct TestRunner {
    config: RunnerConfig,
    token: Option<RunToken>,
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a test runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config, token: None }
    }

    /// Pin the run token instead of generating one at setup
    pub fn with_token(mut self, token: RunToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Run every scenario in priority order
    pub async fn run_all(&self) -> TestSuiteResult {
        self.run_scenarios(&Scenario::ALL).await
    }

    /// Run one scenario by name
    pub async fn run_named(&self, name: &str) -> E2eResult<TestSuiteResult> {
        let scenario =
            Scenario::from_name(name).ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))?;
        Ok(self.run_scenarios(&[scenario]).await)
    }

    /// Set up once, then run the given scenarios one after another
    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> TestSuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();

        let (results, run_token) = match self.setup() {
            Ok((ctx, client)) => {
                info!(
                    "Running {} scenario(s) against {} (run token {})",
                    scenarios.len(),
                    ctx.target().base_url(),
                    ctx.token()
                );
                let mut results = Vec::with_capacity(scenarios.len());
                for scenario in scenarios {
                    results.push(Self::run_scenario(*scenario, &ctx, &client).await);
                }
                (results, Some(ctx.token().to_string()))
            }
            Err(e) => {
                error!("Suite setup failed, no scenario can run: {}", e);
                let reason = e.to_string();
                let results = scenarios
                    .iter()
                    .map(|scenario| {
                        error!("✗ {} - not run", scenario.name());
                        TestResult {
                            name: scenario.name().to_string(),
                            priority: scenario.priority(),
                            description: scenario.description().to_string(),
                            outcome: Outcome::Errored,
                            duration_ms: 0,
                            diagnostics: vec![],
                            error: Some(reason.clone()),
                            transport_failure: false,
                        }
                    })
                    .collect();
                (results, None)
            }
        };

        let count = |outcome: Outcome| results.iter().filter(|r| r.outcome == outcome).count();
        let passed = count(Outcome::Passed);
        let failed = count(Outcome::Failed);
        let errored = count(Outcome::Errored);
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Test Results: {} passed, {} failed, {} errored ({} ms)",
            passed, failed, errored, duration_ms
        );

        TestSuiteResult {
            started_at,
            base_url: self.config.target.base_url().to_string(),
            run_token,
            total: scenarios.len(),
            passed,
            failed,
            errored,
            duration_ms,
            results,
        }
    }

    fn setup(&self) -> E2eResult<(TestContext, UsersClient)> {
        let target = self.config.target.clone();
        let ctx = match &self.token {
            Some(token) => TestContext::with_token(target, token.clone())?,
            None => TestContext::new(target)?,
        };
        let client = UsersClient::new(ctx.target())
            .map_err(|e| E2eError::Setup(format!("could not build HTTP client: {}", e)))?;
        Ok((ctx, client))
    }

    async fn run_scenario(scenario: Scenario, ctx: &TestContext, client: &UsersClient) -> TestResult {
        let start = Instant::now();
        debug!("Running scenario {}: {}", scenario.priority(), scenario.name());

        let outcome = scenario.execute(ctx, client).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let mut result = TestResult {
            name: scenario.name().to_string(),
            priority: scenario.priority(),
            description: scenario.description().to_string(),
            outcome: Outcome::Passed,
            duration_ms,
            diagnostics: vec![],
            error: None,
            transport_failure: false,
        };

        match outcome {
            Ok(diagnostics) => {
                for line in &diagnostics {
                    info!("  {}", line);
                }
                info!("✓ {} ({} ms)", result.name, duration_ms);
                result.diagnostics = diagnostics;
            }
            Err(e) => {
                error!("✗ {} - {}", result.name, e);
                result.outcome = Outcome::Failed;
                result.transport_failure = e.is_transport();
                result.error = Some(e.to_string());
            }
        }

        result
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
