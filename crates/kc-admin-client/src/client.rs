//! Admin REST API client.

use std::time::Duration;

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{self, read_success, AdminCredentials};
use crate::dto::{
    ClientRepresentation, CreatedClient, CreatedGroup, CreatedRole, GroupRepresentation,
    RealmRepresentation, RoleRepresentation, UserQuery, UserRepresentation,
};
use crate::error::{AdminError, AdminResult};

/// Client for the admin REST API, authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct KeycloakAdminClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

/// Raw outcome of a successful admin request.
struct Reply {
    headers: HeaderMap,
    body: String,
}

impl KeycloakAdminClient {
    /// Creates a client using an already issued access token.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> AdminResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_http_client(client, base_url, access_token))
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Authenticates with the password grant and returns a ready client.
    pub async fn authenticate(
        base_url: impl Into<String>,
        credentials: &AdminCredentials,
    ) -> AdminResult<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let token = auth::authenticate(&client, &base_url, credentials).await?;
        Ok(Self::with_http_client(client, base_url, token))
    }

    /// Gets the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Gets the bearer token attached to every request.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<String>,
        body: Option<&B>,
    ) -> AdminResult<Reply> {
        let url = match query {
            Some(q) if !q.is_empty() => format!("{}{path}?{q}", self.base_url),
            _ => format!("{}{path}", self.base_url),
        };
        tracing::debug!(%method, %url, "admin request");

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.access_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let headers = response.headers().clone();
        let body = read_success(response).await?;
        Ok(Reply { headers, body })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<String>,
    ) -> AdminResult<T> {
        let reply = self.send::<()>(Method::GET, path, query, None).await?;
        Ok(serde_json::from_str(&reply.body)?)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AdminResult<Reply> {
        self.send(Method::POST, path, None, Some(body)).await
    }

    /// Creates a realm.
    pub async fn create_realm(&self, realm: &RealmRepresentation) -> AdminResult<()> {
        self.post("/admin/realms", realm).await?;
        tracing::info!(realm = ?realm.realm, "realm created");
        Ok(())
    }

    /// Creates a client and returns its internal id.
    pub async fn create_client(
        &self,
        realm: &str,
        client: &ClientRepresentation,
    ) -> AdminResult<CreatedClient> {
        let path = format!("/admin/realms/{}/clients", segment(realm));
        let reply = self.post(&path, client).await?;
        let id = created_value(&reply, "id")?;
        Ok(CreatedClient { id })
    }

    /// Creates a role on a client.
    pub async fn create_client_role(
        &self,
        realm: &str,
        client_uuid: &str,
        role: &RoleRepresentation,
    ) -> AdminResult<CreatedRole> {
        let path = format!(
            "/admin/realms/{}/clients/{}/roles",
            segment(realm),
            segment(client_uuid)
        );
        let reply = self.post(&path, role).await?;
        let role_name = created_value(&reply, "roleName")?;
        Ok(CreatedRole { role_name })
    }

    /// Lists the roles of a client.
    pub async fn list_client_roles(
        &self,
        realm: &str,
        client_uuid: &str,
    ) -> AdminResult<Vec<RoleRepresentation>> {
        let path = format!(
            "/admin/realms/{}/clients/{}/roles",
            segment(realm),
            segment(client_uuid)
        );
        self.get_json(&path, None).await
    }

    /// Maps client roles to a user.
    pub async fn add_client_role_to_user(
        &self,
        realm: &str,
        user_id: &str,
        client_uuid: &str,
        roles: &[RoleRepresentation],
    ) -> AdminResult<()> {
        let path = format!(
            "/admin/realms/{}/users/{}/role-mappings/clients/{}",
            segment(realm),
            segment(user_id),
            segment(client_uuid)
        );
        self.post(&path, roles).await?;
        Ok(())
    }

    /// Creates a realm role.
    pub async fn create_realm_role(
        &self,
        realm: &str,
        role: &RoleRepresentation,
    ) -> AdminResult<CreatedRole> {
        let path = format!("/admin/realms/{}/roles", segment(realm));
        let reply = self.post(&path, role).await?;
        let role_name = created_value(&reply, "roleName")?;
        Ok(CreatedRole { role_name })
    }

    /// Creates a top-level group.
    pub async fn create_group(
        &self,
        realm: &str,
        group: &GroupRepresentation,
    ) -> AdminResult<CreatedGroup> {
        let path = format!("/admin/realms/{}/groups", segment(realm));
        let reply = self.post(&path, group).await?;
        let id = created_value(&reply, "id")?;
        Ok(CreatedGroup { id })
    }

    /// Counts users matching `query`.
    pub async fn get_users_count(&self, realm: &str, query: &UserQuery) -> AdminResult<u64> {
        let path = format!("/admin/realms/{}/users/count", segment(realm));
        self.get_json(&path, Some(serde_urlencoded::to_string(query)?))
            .await
    }

    /// Lists users matching `query`.
    pub async fn list_users(
        &self,
        realm: &str,
        query: &UserQuery,
    ) -> AdminResult<Vec<UserRepresentation>> {
        let path = format!("/admin/realms/{}/users", segment(realm));
        self.get_json(&path, Some(serde_urlencoded::to_string(query)?))
            .await
    }
}

fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

/// Extracts the identifier of a created resource.
///
/// A JSON body carrying `key` wins; otherwise the last path segment of the
/// `Location` header is used.
fn created_value(reply: &Reply, key: &str) -> AdminResult<String> {
    if let Some(value) = serde_json::from_str::<serde_json::Value>(&reply.body)
        .ok()
        .as_ref()
        .and_then(|v| v.get(key))
        .and_then(serde_json::Value::as_str)
    {
        return Ok(value.to_string());
    }

    let location = reply
        .headers
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AdminError::InvalidResponse(format!("no {key} in body or Location header"))
        })?;
    last_segment(location)
        .ok_or_else(|| AdminError::InvalidResponse(format!("unusable Location header: {location}")))
}

fn last_segment(location: &str) -> Option<String> {
    let raw = location.trim_end_matches('/').rsplit('/').next()?;
    if raw.is_empty() {
        return None;
    }
    urlencoding::decode(raw).ok().map(std::borrow::Cow::into_owned)
}
