//! Common test utilities and fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kc_admin_client::{AdminCredentials, KeycloakAdminClient};
use kc_dataset::{DatasetClient, PollingOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const IN_PROGRESS: &str = "Task in progress";
pub const IDLE: &str = "No task in progress. New task can be started";
pub const ACCESS_TOKEN: &str = "integration-token";

const START_TIME_MS: &str = "1700000000000";
const END_TIME_MS: &str = "1700000002000";

/// A task occupying the service's job slot.
#[derive(Debug, Clone)]
pub struct RunningTask {
    pub message: String,
    pub realm: String,
    pub count: u64,
    /// Status queries that still report the task as running.
    pub polls_left: u32,
    pub fails: bool,
}

impl RunningTask {
    pub fn foreign(message: &str, polls_left: u32) -> Self {
        Self {
            message: message.to_string(),
            realm: String::new(),
            count: 0,
            polls_left,
            fails: false,
        }
    }

    fn json(&self) -> serde_json::Value {
        json!({ "message": self.message, "startTimeMs": START_TIME_MS })
    }
}

/// The record of the last finished task.
#[derive(Debug, Clone)]
pub struct CompletedTask {
    pub message: String,
    pub success: bool,
}

/// In-memory state shared by every responder.
#[derive(Debug, Default)]
pub struct ServiceState {
    /// Realm name to user count.
    pub users: HashMap<String, u64>,
    pub running: Option<RunningTask>,
    pub completed: Option<CompletedTask>,
    /// In-progress polls each new task reports before it finishes.
    pub task_polls: u32,
    /// Whether newly submitted tasks fail.
    pub fail_tasks: bool,
    pub status_queries: u32,
    pub clears: u32,
}

type SharedState = Arc<Mutex<ServiceState>>;

/// Test environment backed by a mock server that emulates both services.
pub struct TestEnv {
    pub server: MockServer,
    pub dataset: DatasetClient,
    state: SharedState,
}

impl TestEnv {
    /// Starts a mock server where each task runs for two status polls.
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kc_dataset=debug,kc_admin_client=debug")
            .with_test_writer()
            .try_init();

        let server = MockServer::start().await;
        let state: SharedState = Arc::new(Mutex::new(ServiceState {
            task_polls: 2,
            ..ServiceState::default()
        }));
        mount_admin(&server, &state).await;
        mount_dataset(&server, &state).await;

        let dataset = DatasetClient::new(server.uri())?;
        Ok(Self {
            server,
            dataset,
            state,
        })
    }

    /// Authenticates against the mocked admin API.
    pub async fn admin(&self) -> anyhow::Result<KeycloakAdminClient> {
        let credentials = AdminCredentials::new("admin", "admin");
        Ok(KeycloakAdminClient::authenticate(self.server.uri(), &credentials).await?)
    }

    pub fn state(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().unwrap()
    }

    /// Polling without suspension and a generous retry budget.
    pub fn fast_polling() -> PollingOptions {
        PollingOptions::default()
            .with_poll_interval_seconds(0.0)
            .with_max_retries(20)
    }
}

async fn mount_admin(server: &MockServer, state: &SharedState) {
    Mock::given(method("GET"))
        .and(path("/realms/master/.well-known/uma2-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issuer": format!("{}/realms/master", server.uri()),
            "token_endpoint": format!(
                "{}/realms/master/protocol/openid-connect/token",
                server.uri()
            )
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/realms/master/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 60
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/realms"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(CreateRealm(state.clone()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/admin/realms/[^/]+/users/count$"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(UsersCount(state.clone()))
        .mount(server)
        .await;
}

async fn mount_dataset(server: &MockServer, state: &SharedState) {
    Mock::given(method("GET"))
        .and(path("/realms/master/dataset/create-users"))
        .respond_with(CreateUsers(state.clone()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/realms/master/dataset/status"))
        .respond_with(Status(state.clone()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/realms/master/dataset/status-completed"))
        .respond_with(StatusCompleted(state.clone()))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/realms/master/dataset/status-completed"))
        .respond_with(ClearCompleted(state.clone()))
        .mount(server)
        .await;
}

struct CreateRealm(SharedState);

impl Respond for CreateRealm {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let Some(realm) = body.get("realm").and_then(serde_json::Value::as_str) else {
            return ResponseTemplate::new(400)
                .set_body_json(json!({"errorMessage": "missing realm"}));
        };

        let mut state = self.0.lock().unwrap();
        if state.users.contains_key(realm) {
            return ResponseTemplate::new(409)
                .set_body_json(json!({"errorMessage": "Conflict detected. See logs for details"}));
        }
        state.users.insert(realm.to_string(), 0);
        ResponseTemplate::new(201)
    }
}

struct UsersCount(SharedState);

impl Respond for UsersCount {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let realm = request.url.path().split('/').nth(3).unwrap_or_default();
        match self.0.lock().unwrap().users.get(realm) {
            Some(count) => ResponseTemplate::new(200).set_body_string(count.to_string()),
            None => ResponseTemplate::new(404).set_body_json(json!({"error": "Realm not found."})),
        }
    }
}

struct CreateUsers(SharedState);

impl Respond for CreateUsers {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let realm = query.get("realm-name").cloned().unwrap_or_default();
        let prefix = query.get("user-prefix").cloned().unwrap_or_else(|| "user-".to_string());
        let count: u64 = query.get("count").and_then(|c| c.parse().ok()).unwrap_or(100);

        let mut state = self.0.lock().unwrap();
        if let Some(running) = &state.running {
            return ResponseTemplate::new(400)
                .set_body_json(json!({"error": IN_PROGRESS, "task": running.json()}));
        }
        if !state.users.contains_key(&realm) {
            return ResponseTemplate::new(400)
                .set_body_json(json!({"error": format!("Realm '{realm}' does not exist")}));
        }

        let task = RunningTask {
            message: format!(
                "Creation of {count} users from {prefix}0 to {prefix}{} in realm {realm}",
                count.saturating_sub(1)
            ),
            realm,
            count,
            polls_left: state.task_polls,
            fails: state.fail_tasks,
        };
        let body = json!({
            "status": "Task started",
            "task": task.json(),
            "task-status-url": "/realms/master/dataset/status"
        });
        state.running = Some(task);
        ResponseTemplate::new(200).set_body_json(body)
    }
}

struct Status(SharedState);

impl Respond for Status {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let mut state = self.0.lock().unwrap();
        state.status_queries += 1;

        if let Some(task) = state.running.as_mut() {
            if task.polls_left > 0 {
                task.polls_left -= 1;
                return ResponseTemplate::new(200)
                    .set_body_json(json!({"status": IN_PROGRESS, "task": task.json()}));
            }
        }

        if let Some(task) = state.running.take() {
            if !task.fails {
                *state.users.entry(task.realm.clone()).or_default() += task.count;
            }
            state.completed = Some(CompletedTask {
                message: task.message,
                success: !task.fails,
            });
        }
        ResponseTemplate::new(200).set_body_json(json!({"status": IDLE}))
    }
}

struct StatusCompleted(SharedState);

impl Respond for StatusCompleted {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let state = self.0.lock().unwrap();
        match &state.completed {
            Some(task) => ResponseTemplate::new(200).set_body_json(json!({
                "status": "previous task completed",
                "task": {
                    "message": task.message,
                    "success": task.success.to_string(),
                    "startTimeMs": START_TIME_MS,
                    "endTimeMs": END_TIME_MS
                }
            })),
            None => {
                ResponseTemplate::new(200).set_body_json(json!({"status": "No completed task"}))
            }
        }
    }
}

struct ClearCompleted(SharedState);

impl Respond for ClearCompleted {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let mut state = self.0.lock().unwrap();
        state.completed = None;
        state.clears += 1;
        ResponseTemplate::new(200).set_body_json(json!({"status": "Deleted completed task"}))
    }
}
