//! # kc-admin-client
//!
//! Thin client for the Keycloak admin REST API, covering the calls load
//! tests need to prepare and verify their data.
//!
//! ```no_run
//! # async fn run() -> kc_admin_client::AdminResult<()> {
//! use kc_admin_client::{AdminCredentials, KeycloakAdminClient, RealmRepresentation, UserQuery};
//!
//! let admin = KeycloakAdminClient::authenticate(
//!     "http://localhost:8080",
//!     &AdminCredentials::new("admin", "admin"),
//! )
//! .await?;
//! admin.create_realm(&RealmRepresentation::named("bench")).await?;
//! let count = admin.get_users_count("bench", &UserQuery::default()).await?;
//! assert_eq!(count, 0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod client;
pub mod dto;
pub mod error;

pub use auth::{authenticate, AdminCredentials, ADMIN_CLI_CLIENT_ID};
pub use client::KeycloakAdminClient;
pub use dto::{
    ClientRepresentation, CreatedClient, CreatedGroup, CreatedRole, CredentialRepresentation,
    GroupRepresentation, RealmRepresentation, RoleRepresentation, UserQuery, UserRepresentation,
};
pub use error::{AdminError, AdminResult};
