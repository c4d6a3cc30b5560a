//! # kc-dataset
//!
//! Client for the Keycloak benchmark dataset service.
//!
//! The dataset service bulk-generates realms, clients, users, events,
//! offline sessions and authorization resources. Every bulk operation starts
//! an asynchronous task in the server's single job slot; this crate submits
//! those tasks and waits for them to finish.
//!
//! ```no_run
//! # async fn run() -> kc_dataset::DatasetResult<()> {
//! use kc_dataset::{CreateUsersOptions, DatasetClient, PollingOptions};
//!
//! let client = DatasetClient::new("http://localhost:8080")?;
//! let submission = client
//!     .create_users(&CreateUsersOptions {
//!         realm_name: Some("my-realm".to_string()),
//!         count: Some(1000),
//!         ..Default::default()
//!     })
//!     .await?;
//! let task = client
//!     .wait_for_task_to_complete(&submission, &PollingOptions::default())
//!     .await?;
//! println!("{} finished", task.message);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod options;
pub mod poller;
pub mod response;

pub use client::DatasetClient;
pub use error::{DatasetError, DatasetResult, PollStage};
pub use options::{
    options_from_pairs, CreateAuthzResourcesOptions, CreateClientsOptions, CreateEventsOptions,
    CreateOfflineSessionsOptions, CreateRealmsOptions, CreateUsersOptions, LastClientOptions,
    LastRealmOptions, LastUserOptions, PollingConfig, PollingOptions, RemoveRealmsOptions,
    RemoveUsersOptions,
};
pub use poller::{wait_for_task_to_complete, JobStatusApi, TaskPoller};
pub use response::{JobStatus, Task, TaskResponse};
