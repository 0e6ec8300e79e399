//! CLI command implementations

use anyhow::Result;
use rand::distr::Alphanumeric;
use rand::RngExt;
use std::fs;

use crate::api;
use crate::auth::models::{Identity, Role};
use crate::cli::{error, info, print_identity, print_user_table, success, warn, OutputFormat};
use crate::client::{PortalClient, SessionStore};
use crate::config::{self, load_config};

/// Initialize a new studentportal.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("studentportal.toml");

    if config_path.exists() {
        warn("studentportal.toml already exists");
        return Ok(());
    }

    let secret: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();

    let content = config::default_config_content(&secret);
    fs::write(config_path, content)?;

    success("Created studentportal.toml");
    info("Run 'studentportal serve' to start the API, or 'studentportal login <username>' to sign in");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    api::run_server(config, &host, port).await?;

    Ok(())
}

/// Log in and persist the session
pub async fn login(username: &str, password: Option<String>, role: Role) -> Result<()> {
    let config = load_config()?;
    let client = PortalClient::from_config(&config)?;

    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt(format!("Password for {}", username))
            .interact()?,
    };

    match client.login(username, &password, role).await {
        Ok(identity) => {
            success(&format!(
                "Logged in as {} ({})",
                identity.full_name, identity.role
            ));
            print_identity(&identity);
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

/// Show the identity of the current session
pub async fn whoami() -> Result<()> {
    let config = load_config()?;
    let store = SessionStore::new(&config.client.session_file);

    match store.current_identity() {
        Some(identity) => print_identity(&identity),
        None => info("Not logged in. Run 'studentportal login <username>' to sign in"),
    }

    Ok(())
}

/// Clear the persisted session
pub async fn logout() -> Result<()> {
    let config = load_config()?;
    let store = SessionStore::new(&config.client.session_file);

    if store.current().is_none() {
        info("Not logged in");
        return Ok(());
    }

    store.clear()?;
    success("Logged out");

    Ok(())
}

/// List directory users
pub async fn users(role: Option<Role>, format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let client = PortalClient::from_config(&config)?;

    let roles = match role {
        Some(role) => vec![role],
        None => vec![Role::Student, Role::Staff],
    };

    let mut users: Vec<Identity> = Vec::new();
    for role in roles {
        match client.roster(role).await {
            Ok(batch) => users.extend(batch),
            Err(e) => {
                error(&format!("Failed to list {} users: {}", role, e));
                return Err(e.into());
            }
        }
    }

    match format {
        OutputFormat::Table => print_user_table(&users),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&users)?;
            println!("{}", json);
        }
    }

    Ok(())
}
