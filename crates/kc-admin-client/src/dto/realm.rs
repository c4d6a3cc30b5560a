//! Realm representation.

use serde::{Deserialize, Serialize};

/// Realm representation for create requests and responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRepresentation {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Realm name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Display name for UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the realm is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    // Security settings
    /// SSL requirement level (`external`, `none`, `all`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_required: Option<String>,
    /// Password policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policy: Option<String>,

    // Registration settings
    /// Allow user self-registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_allowed: Option<bool>,
    /// Require email verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_email: Option<bool>,
    /// Allow password reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_allowed: Option<bool>,

    // Login settings
    /// Allow login with email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_with_email_allowed: Option<bool>,
    /// Allow duplicate emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_emails_allowed: Option<bool>,
    /// Enable "Remember Me" checkbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,

    // Token and session lifespans
    /// Access token lifespan in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_lifespan: Option<i32>,
    /// SSO session idle timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_session_idle_timeout: Option<i32>,
    /// SSO session max lifespan in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_session_max_lifespan: Option<i32>,
    /// Offline session idle timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_session_idle_timeout: Option<i32>,

    // Events
    /// Enable event logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_enabled: Option<bool>,
    /// Enable admin event logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_events_enabled: Option<bool>,
}

impl RealmRepresentation {
    /// Creates an enabled realm representation.
    pub fn named(realm: impl Into<String>) -> Self {
        Self {
            realm: Some(realm.into()),
            enabled: Some(true),
            ..Self::default()
        }
    }
}
