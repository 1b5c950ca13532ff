//! The ordered scenarios exercised against the user API

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::checks::{
    expect_array_prefix, expect_body_contains, expect_body_present, expect_content_type,
    expect_status,
};
use crate::client::UsersClient;
use crate::context::TestContext;
use crate::error::E2eResult;

const APPLICATION_JSON: &str = "application/json";

/// One request/assert block. Variants are declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    ListUsersStatus,
    CreateUserStatus,
    ListUsersContentType,
    CreateUserEchoesName,
    ListUsersAfterCreation,
}

impl Scenario {
    /// Every scenario, in execution order
    pub const ALL: [Scenario; 5] = [
        Scenario::ListUsersStatus,
        Scenario::CreateUserStatus,
        Scenario::ListUsersContentType,
        Scenario::CreateUserEchoesName,
        Scenario::ListUsersAfterCreation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ListUsersStatus => "list_users_status",
            Scenario::CreateUserStatus => "create_user_status",
            Scenario::ListUsersContentType => "list_users_content_type",
            Scenario::CreateUserEchoesName => "create_user_echoes_name",
            Scenario::ListUsersAfterCreation => "list_users_after_creation",
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            Scenario::ListUsersStatus => 1,
            Scenario::CreateUserStatus => 2,
            Scenario::ListUsersContentType => 3,
            Scenario::CreateUserEchoesName => 4,
            Scenario::ListUsersAfterCreation => 5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::ListUsersStatus => "GET /api/users answers 200 with a body",
            Scenario::CreateUserStatus => "POST /api/users answers 201 with a body",
            Scenario::ListUsersContentType => "GET /api/users answers application/json",
            Scenario::CreateUserEchoesName => "POST /api/users echoes the created name",
            Scenario::ListUsersAfterCreation => "GET /api/users lists users after a creation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Run the calls and assertions. Returns diagnostic lines on success.
    pub async fn execute(&self, ctx: &TestContext, client: &UsersClient) -> E2eResult<Vec<String>> {
        let endpoint = client.endpoint();

        match self {
            Scenario::ListUsersStatus => {
                let response = client.list_users().await?;
                expect_status(&response, "GET", endpoint, 200)?;
                expect_body_present(&response, "GET /api/users")?;
                Ok(vec![
                    format!("GET API Status Code: {}", response.status),
                    format!("GET API Endpoint: {}", endpoint),
                ])
            }
            Scenario::CreateUserStatus => {
                let payload = ctx.user("John Doe", "john.doe");
                let response = client.create_user(&payload).await?;
                expect_status(&response, "POST", endpoint, 201)?;
                expect_body_present(&response, "POST /api/users")?;
                Ok(vec![
                    format!("POST API Status Code: {}", response.status),
                    format!("POST API Endpoint: {}", endpoint),
                ])
            }
            Scenario::ListUsersContentType => {
                let response = client.list_users().await?;
                expect_status(&response, "GET", endpoint, 200)?;
                expect_content_type(&response, APPLICATION_JSON)?;
                Ok(vec![format!(
                    "GET API Content Type: {}",
                    response.content_type.as_deref().unwrap_or_default()
                )])
            }
            Scenario::CreateUserEchoesName => {
                let payload = ctx.user("Jane Smith", "jane.smith");
                let response = client.create_user(&payload).await?;
                expect_status(&response, "POST", endpoint, 201)?;
                expect_body_contains(&response, &payload.name)?;
                Ok(vec![format!("POST API Response: {}", response.body)])
            }
            Scenario::ListUsersAfterCreation => {
                // Seed our own user so the listing does not depend on earlier scenarios.
                let seed = ctx.user("List Seed", "list.seed");
                let created = client.create_user(&seed).await?;
                expect_status(&created, "POST", endpoint, 201)?;

                let response = client.list_users().await?;
                expect_status(&response, "GET", endpoint, 200)?;
                expect_array_prefix(&response)?;

                let count = match response.json_array_len() {
                    Ok(n) => n.to_string(),
                    Err(e) => {
                        warn!("Could not count users in listing: {}", e);
                        "unknown".to_string()
                    }
                };
                Ok(vec![
                    format!("Total Users Retrieved: {}", count),
                    format!(
                        "GET API Verification Successful with Status Code: {}",
                        response.status
                    ),
                ])
            }
        }
    }
}
