//! Admin token retrieval.
//!
//! The admin CLI client authenticates with the resource owner password grant
//! against the master realm. The token endpoint is discovered from the
//! realm's UMA2 configuration document instead of being hardcoded.

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};

/// Client identifier used for admin password grants.
pub const ADMIN_CLI_CLIENT_ID: &str = "admin-cli";

/// Path of the master realm discovery document.
pub const DISCOVERY_PATH: &str = "/realms/master/.well-known/uma2-configuration";

/// Admin user credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
    /// Client used for the password grant.
    pub client_id: String,
}

impl AdminCredentials {
    /// Creates credentials for the `admin-cli` client.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_id: ADMIN_CLI_CLIENT_ID.to_string(),
        }
    }

    /// Overrides the client used for the password grant.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }
}

/// The subset of the discovery document needed to obtain a token.
#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    token_endpoint: Option<String>,
}

/// Password grant form body.
#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'static str,
    username: &'a str,
    password: &'a str,
    client_id: &'a str,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Fetches an admin access token from the server at `base_url`.
pub async fn authenticate(
    http: &reqwest::Client,
    base_url: &str,
    credentials: &AdminCredentials,
) -> AdminResult<String> {
    let base_url = base_url.trim_end_matches('/');
    let discovery_url = format!("{base_url}{DISCOVERY_PATH}");
    tracing::debug!(url = %discovery_url, "fetching discovery document");

    let body = read_success(http.get(&discovery_url).send().await?).await?;
    let discovery: DiscoveryDocument = serde_json::from_str(&body)?;
    let token_endpoint = discovery
        .token_endpoint
        .ok_or_else(|| AdminError::Auth("discovery document has no token_endpoint".to_string()))?;

    tracing::debug!(
        url = %token_endpoint,
        username = %credentials.username,
        "requesting admin token"
    );
    let form = PasswordGrant {
        grant_type: "password",
        username: &credentials.username,
        password: &credentials.password,
        client_id: &credentials.client_id,
    };
    let body = read_success(http.post(&token_endpoint).form(&form).send().await?).await?;
    let token: TokenResponse = serde_json::from_str(&body)?;

    let access_token = token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AdminError::Auth("token response has no access_token".to_string()))?;
    tracing::info!(expires_in = ?token.expires_in, "admin token acquired");
    Ok(access_token)
}

/// Returns the body of a 2xx response, or an `Api` error.
pub(crate) async fn read_success(response: reqwest::Response) -> AdminResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(AdminError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
