//! Admin API commands.

use kc_admin_client::{KeycloakAdminClient, RealmRepresentation, UserQuery, UserRepresentation};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::AdminCommand;
use crate::config::OutputFormat;
use crate::output::{output, success};
use crate::CliResult;

use super::Context;

/// User row for table output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserDisplay {
    /// User ID.
    #[tabled(rename = "ID")]
    pub id: String,
    /// Username.
    #[tabled(rename = "Username")]
    pub username: String,
    /// Email address.
    #[tabled(rename = "Email")]
    pub email: String,
    /// Whether the user is enabled.
    #[tabled(rename = "Enabled")]
    pub enabled: bool,
}

impl From<UserRepresentation> for UserDisplay {
    fn from(user: UserRepresentation) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            enabled: user.enabled.unwrap_or(false),
        }
    }
}

/// Role row for table output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RoleDisplay {
    /// Role ID.
    #[tabled(rename = "ID")]
    pub id: String,
    /// Role name.
    #[tabled(rename = "Name")]
    pub name: String,
    /// Role description.
    #[tabled(rename = "Description")]
    pub description: String,
}

/// Runs an admin command.
pub async fn run_admin(cmd: AdminCommand, ctx: &Context) -> CliResult<()> {
    let credentials = ctx.credentials()?;
    let client = KeycloakAdminClient::authenticate(ctx.server_url(), &credentials).await?;
    let format = ctx.output_format();

    match cmd {
        AdminCommand::CreateRealm { name } => {
            client
                .create_realm(&RealmRepresentation::named(name.as_str()))
                .await?;
            success(&format!("Realm '{name}' created successfully"));
            Ok(())
        }
        AdminCommand::UsersCount { realm, search } => {
            let query = UserQuery {
                search,
                ..UserQuery::default()
            };
            let count = client.get_users_count(&realm, &query).await?;
            print_count(&realm, count, format)
        }
        AdminCommand::ListUsers { realm, max, search } => {
            let query = UserQuery {
                max,
                search,
                ..UserQuery::default()
            };
            let users: Vec<UserDisplay> = client
                .list_users(&realm, &query)
                .await?
                .into_iter()
                .map(UserDisplay::from)
                .collect();
            output(&users, format)
        }
        AdminCommand::ClientRoles { realm, client_uuid } => {
            let roles: Vec<RoleDisplay> = client
                .list_client_roles(&realm, &client_uuid)
                .await?
                .into_iter()
                .map(|role| RoleDisplay {
                    id: role.id.unwrap_or_default(),
                    name: role.name.unwrap_or_default(),
                    description: role.description.unwrap_or_default(),
                })
                .collect();
            output(&roles, format)
        }
    }
}

fn print_count(realm: &str, count: u64, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({ "realm": realm, "count": count });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Quiet => println!("{count}"),
        OutputFormat::Table | OutputFormat::Yaml => println!("{realm}: {count} users"),
    }
    Ok(())
}
