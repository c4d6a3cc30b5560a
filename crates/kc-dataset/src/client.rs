//! HTTP client for the dataset service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::error::{DatasetError, DatasetResult};
use crate::options::{
    to_query, CreateAuthzResourcesOptions, CreateClientsOptions, CreateEventsOptions,
    CreateOfflineSessionsOptions, CreateRealmsOptions, CreateUsersOptions, LastClientOptions,
    LastRealmOptions, LastUserOptions, PollingOptions, RemoveRealmsOptions, RemoveUsersOptions,
};
use crate::poller::{JobStatusApi, TaskPoller};
use crate::response::{Task, TaskResponse};

/// Path of the dataset resource under the server base URL.
pub const DATASET_PATH: &str = "/realms/master/dataset";

/// Client for the dataset service endpoints.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatasetClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> DatasetResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_http_client(client, base_url))
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Gets the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL of a dataset endpoint.
    fn url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{DATASET_PATH}{path}", self.base_url)
        } else {
            format!("{}{DATASET_PATH}{path}?{query}", self.base_url)
        }
    }

    /// Sends a request and returns the raw body of a successful response.
    async fn send(&self, method: Method, path: &str, query: &str) -> DatasetResult<String> {
        let url = self.url(path, query);
        tracing::debug!(%method, %url, "dataset request");

        let response = self.client.request(method, &url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(DatasetError::request_failed(status.as_u16(), body));
        }
        Ok(body)
    }

    /// Issues a GET with `options` as query and decodes the envelope.
    async fn get<O: Serialize + Sync>(
        &self,
        path: &str,
        options: &O,
    ) -> DatasetResult<TaskResponse> {
        let query = to_query(options)?;
        let body = self.send(Method::GET, path, &query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Starts realm creation.
    pub async fn create_realms(
        &self,
        options: &CreateRealmsOptions,
    ) -> DatasetResult<TaskResponse> {
        self.get("/create-realms", options).await
    }

    /// Starts realm removal.
    pub async fn remove_realms(
        &self,
        options: &RemoveRealmsOptions,
    ) -> DatasetResult<TaskResponse> {
        self.get("/remove-realms", options).await
    }

    /// Starts client creation.
    pub async fn create_clients(
        &self,
        options: &CreateClientsOptions,
    ) -> DatasetResult<TaskResponse> {
        self.get("/create-clients", options).await
    }

    /// Starts user creation.
    pub async fn create_users(&self, options: &CreateUsersOptions) -> DatasetResult<TaskResponse> {
        self.get("/create-users", options).await
    }

    /// Starts user removal.
    pub async fn remove_users(&self, options: &RemoveUsersOptions) -> DatasetResult<TaskResponse> {
        self.get("/remove-users", options).await
    }

    /// Starts event creation.
    pub async fn create_events(
        &self,
        options: &CreateEventsOptions,
    ) -> DatasetResult<TaskResponse> {
        self.get("/create-events", options).await
    }

    /// Starts offline session creation.
    pub async fn create_offline_sessions(
        &self,
        options: &CreateOfflineSessionsOptions,
    ) -> DatasetResult<TaskResponse> {
        self.get("/create-offline-sessions", options).await
    }

    /// Starts authorization resource creation.
    pub async fn create_authz_resources(
        &self,
        options: &CreateAuthzResourcesOptions,
    ) -> DatasetResult<TaskResponse> {
        self.get("/authz/create-resources", options).await
    }

    /// Gets the last realm created with a prefix.
    pub async fn last_realm(&self, options: &LastRealmOptions) -> DatasetResult<TaskResponse> {
        self.get("/last-realm", options).await
    }

    /// Gets the last client created with a prefix.
    pub async fn last_client(&self, options: &LastClientOptions) -> DatasetResult<TaskResponse> {
        self.get("/last-client", options).await
    }

    /// Gets the last user created with a prefix.
    pub async fn last_user(&self, options: &LastUserOptions) -> DatasetResult<TaskResponse> {
        self.get("/last-user", options).await
    }

    /// Waits for the task named by `submission`, then clears its record.
    ///
    /// See [`TaskPoller::wait`] for the error cases.
    pub async fn wait_for_task_to_complete(
        &self,
        submission: &TaskResponse,
        options: &PollingOptions,
    ) -> DatasetResult<Task> {
        TaskPoller::new(self, options)?.wait(submission).await
    }
}

#[async_trait]
impl JobStatusApi for DatasetClient {
    async fn running_job_status(&self) -> DatasetResult<TaskResponse> {
        let body = self.send(Method::GET, "/status", "").await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn completed_job_status(&self) -> DatasetResult<TaskResponse> {
        let body = self.send(Method::GET, "/status-completed", "").await?;
        tracing::debug!(%body, "completed job status");
        Ok(serde_json::from_str(&body)?)
    }

    async fn clear_completed_job(&self) -> DatasetResult<()> {
        self.send(Method::DELETE, "/status-completed", "").await?;
        Ok(())
    }
}
