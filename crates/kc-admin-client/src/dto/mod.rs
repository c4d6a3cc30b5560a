//! Representations exchanged with the admin REST API.
//!
//! Every field is optional and omitted when unset, so a representation can
//! carry exactly the attributes a benchmark cares about.

pub mod client;
pub mod group;
pub mod realm;
pub mod role;
pub mod user;

pub use client::{ClientRepresentation, CreatedClient};
pub use group::{CreatedGroup, GroupRepresentation};
pub use realm::RealmRepresentation;
pub use role::{CreatedRole, RoleRepresentation};
pub use user::{CredentialRepresentation, UserQuery, UserRepresentation};
