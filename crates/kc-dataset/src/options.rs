//! Operation options for dataset endpoints and polling configuration.
//!
//! Every operation option is optional and left out of the query string when
//! unset, so the dataset service applies its own default. Field names go on
//! the wire in hyphen-case (`realm_prefix` becomes `realm-prefix`).

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};

/// Default suspension between two running-status queries.
pub const DEFAULT_POLL_INTERVAL_SECONDS: f64 = 1.0;

/// Default number of running-status queries before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 60;

/// Options for `/create-realms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CreateRealmsOptions {
    /// Prefix of created realm names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_prefix: Option<String>,
    /// Number of realms to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Prefix of realm role names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_role_prefix: Option<String>,
    /// Realm roles created in each realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_roles_per_realm: Option<u32>,
    /// Prefix of client ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,
    /// Clients created in each realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_per_realm: Option<u32>,
    /// Clients created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_per_transaction: Option<u32>,
    /// Entries created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_per_transaction: Option<u32>,
    /// Prefix of client role names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role_prefix: Option<String>,
    /// Access type of created clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_access_type: Option<String>,
    /// Whether created clients get a service account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_service_account_client: Option<bool>,
    /// Client roles created for each client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_roles_per_client: Option<u32>,
    /// Prefix of group names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_prefix: Option<String>,
    /// Groups created in each realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_per_realm: Option<u32>,
    /// Groups created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_per_transaction: Option<u32>,
    /// Prefix of usernames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prefix: Option<String>,
    /// Users created in each realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_per_realm: Option<u32>,
    /// Groups each user joins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_per_user: Option<u32>,
    /// Realm roles granted to each user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_roles_per_user: Option<u32>,
    /// Client roles granted to each user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_roles_per_user: Option<u32>,
    /// Password hash iterations for created credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash_iterations: Option<u32>,
    /// Whether events are enabled in created realms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_enabled: Option<bool>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Users created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_per_transaction: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/remove-realms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RemoveRealmsOptions {
    /// Prefix of realm names to remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_prefix: Option<String>,
    /// Remove every realm matching the prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_all: Option<bool>,
    /// Index of the first realm to remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_to_remove: Option<u32>,
    /// Index of the last realm to remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_to_remove: Option<u32>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/create-clients`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CreateClientsOptions {
    /// Realm receiving the clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
    /// Number of clients to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Prefix of client ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,
    /// Clients created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_per_transaction: Option<u32>,
    /// Entries created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_per_transaction: Option<u32>,
    /// Prefix of client role names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role_prefix: Option<String>,
    /// Access type of created clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_access_type: Option<String>,
    /// Whether created clients get a service account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_service_account_client: Option<bool>,
    /// Client roles created for each client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_roles_per_client: Option<u32>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/create-users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CreateUsersOptions {
    /// Realm receiving the users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
    /// Prefix of clients whose roles are granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,
    /// Prefix of realm roles to grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_role_prefix: Option<String>,
    /// Number of users to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Prefix of client roles to grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role_prefix: Option<String>,
    /// Prefix of groups to join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_prefix: Option<String>,
    /// Prefix of usernames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prefix: Option<String>,
    /// Groups each user joins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_per_user: Option<u32>,
    /// Realm roles granted to each user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_roles_per_user: Option<u32>,
    /// Client roles granted to each user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_roles_per_user: Option<u32>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Users created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_per_transaction: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
    /// Explicit realm roles to grant, comma separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_realm_roles: Option<String>,
    /// Explicit client roles to grant, comma separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_client_roles: Option<String>,
    /// Explicit groups to join, comma separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_groups: Option<String>,
    /// User attributes to set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
}

/// Options for `/remove-users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RemoveUsersOptions {
    /// Realm to remove users from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
    /// Remove every generated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_all: Option<bool>,
    /// Index of the first user to remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_to_remove: Option<u32>,
    /// Index of the last user to remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_to_remove: Option<u32>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/create-events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CreateEventsOptions {
    /// Prefix of realms receiving events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_prefix: Option<String>,
    /// Number of events to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/create-offline-sessions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CreateOfflineSessionsOptions {
    /// Prefix of realms receiving sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_prefix: Option<String>,
    /// Prefix of clients the sessions belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,
    /// Number of sessions to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Prefix of session owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prefix: Option<String>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/authz/create-resources`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CreateAuthzResourcesOptions {
    /// Realm holding the resource server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
    /// Client id of the resource server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Prefix of resource names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_prefix: Option<String>,
    /// Scopes attached to each resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes_per_resource: Option<u32>,
    /// Prefix of scope names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_prefix: Option<String>,
    /// Users referenced by each user policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_per_user_policy: Option<u32>,
    /// Number of resources to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Clients created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_per_transaction: Option<u32>,
    /// Entries created per transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_per_transaction: Option<u32>,
    /// Prefix of usernames referenced by policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prefix: Option<String>,
    /// Users present in the realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_per_realm: Option<u32>,
    /// Transaction timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_in_seconds: Option<u32>,
    /// Worker threads on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<u32>,
    /// Server-side task timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_timeout: Option<u32>,
}

/// Options for `/last-realm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LastRealmOptions {
    /// Prefix of realm names to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_prefix: Option<String>,
}

/// Options for `/last-client`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LastClientOptions {
    /// Realm to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
    /// Prefix of client ids to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,
}

/// Options for `/last-user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LastUserOptions {
    /// Realm to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
    /// Prefix of usernames to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prefix: Option<String>,
}

/// Encodes options as a query string (without the leading `?`).
pub fn to_query<O: Serialize>(options: &O) -> DatasetResult<String> {
    serde_urlencoded::to_string(options).map_err(|e| DatasetError::InvalidOptions(e.to_string()))
}

/// Builds options from textual `key=value` pairs.
///
/// Values are parsed into the field's type; unknown keys are rejected.
pub fn options_from_pairs<O: DeserializeOwned>(pairs: &[(String, String)]) -> DatasetResult<O> {
    let encoded = serde_urlencoded::to_string(pairs)
        .map_err(|e| DatasetError::InvalidOptions(e.to_string()))?;
    serde_urlencoded::from_str(&encoded).map_err(|e| DatasetError::InvalidOptions(e.to_string()))
}

/// Caller-facing polling options; unset fields fall back to defaults
/// independently of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingOptions {
    /// Seconds to wait between two running-status queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_seconds: Option<f64>,
    /// Maximum number of running-status queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl PollingOptions {
    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval_seconds(mut self, seconds: f64) -> Self {
        self.poll_interval_seconds = Some(seconds);
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Fills unset fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            poll_interval_seconds: self.poll_interval_seconds.or(fallback.poll_interval_seconds),
            max_retries: self.max_retries.or(fallback.max_retries),
        }
    }

    /// Resolves the effective schedule.
    pub fn resolve(&self) -> DatasetResult<PollingConfig> {
        let seconds = self
            .poll_interval_seconds
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS);
        let poll_interval = Duration::try_from_secs_f64(seconds).map_err(|_| {
            DatasetError::InvalidPollingOptions(format!(
                "poll interval must be a finite, non-negative number of seconds, got {seconds}"
            ))
        })?;

        Ok(PollingConfig {
            poll_interval,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }
}

/// Resolved, immutable schedule for one polling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Suspension between two running-status queries.
    pub poll_interval: Duration,
    /// Maximum number of running-status queries.
    pub max_retries: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}
