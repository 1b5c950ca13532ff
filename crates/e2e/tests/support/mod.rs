//! In-process stand-in for the user API, served by axum on an ephemeral port

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Knobs for bending the stub away from the happy-path contract
#[derive(Debug, Clone)]
pub struct StubBehavior {
    pub list_content_type: String,
    pub list_body_override: Option<String>,
    /// Hold the listing response back this long
    pub list_delay: Duration,
    pub create_status: StatusCode,
    pub echo_name: bool,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            list_content_type: "application/json".to_string(),
            list_body_override: None,
            list_delay: Duration::ZERO,
            create_status: StatusCode::CREATED,
            echo_name: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
    pub name: String,
    pub email: String,
}

#[derive(Clone)]
struct StubState {
    behavior: StubBehavior,
    users: Arc<Mutex<Vec<CreatedUser>>>,
}

/// Handle for the stub server; the server task stops on drop.
pub struct UserApiStub {
    base_url: String,
    users: Arc<Mutex<Vec<CreatedUser>>>,
    task: JoinHandle<()>,
}

impl UserApiStub {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Users accepted by the creation endpoint, in arrival order
    pub fn created(&self) -> Vec<CreatedUser> {
        self.users.lock().expect("stub users lock").clone()
    }
}

impl Drop for UserApiStub {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn spawn_stub() -> UserApiStub {
    spawn_stub_with(StubBehavior::default()).await
}

pub async fn spawn_stub_with(behavior: StubBehavior) -> UserApiStub {
    let users = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior,
        users: Arc::clone(&users),
    };
    let app = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    UserApiStub {
        base_url: format!("http://{}", addr),
        users,
        task,
    }
}

/// Base URL of a port nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind spare listener");
    let port = listener.local_addr().expect("spare local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

async fn list_users(State(state): State<StubState>) -> Response {
    if !state.behavior.list_delay.is_zero() {
        tokio::time::sleep(state.behavior.list_delay).await;
    }

    let body = match &state.behavior.list_body_override {
        Some(body) => body.clone(),
        None => {
            let users = state.users.lock().expect("stub users lock");
            let listed: Vec<Value> = users
                .iter()
                .enumerate()
                .map(|(i, u)| json!({"id": i + 1, "name": u.name, "email": u.email}))
                .collect();
            Value::Array(listed).to_string()
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.behavior.list_content_type.clone())],
        body,
    )
        .into_response()
}

async fn create_user(State(state): State<StubState>, Json(user): Json<CreatedUser>) -> Response {
    let mut users = state.users.lock().expect("stub users lock");
    if users.iter().any(|u| u.email == user.email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "email already exists"})),
        )
            .into_response();
    }

    let id = users.len() + 1;
    let body = if state.behavior.echo_name {
        json!({"id": id, "name": user.name, "email": user.email})
    } else {
        json!({"id": id})
    };
    users.push(user);

    (state.behavior.create_status, Json(body)).into_response()
}
