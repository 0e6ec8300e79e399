//! Portal client
//!
//! `login`, `current_identity`, and `logout` over a single code path. The
//! backend is selected by configuration: `remote` talks HTTP to the service,
//! `fixture` resolves against the in-process demo directory. The session
//! store is handed in at construction rather than reached for as a global.

use crate::auth::claims::{issue_token, verify_token};
use crate::auth::models::{Identity, LoginRequest, LoginResponse, Role};
use crate::client::session::{Session, SessionStore};
use crate::config::{BackendMode, Config};
use crate::directory::UserDirectory;
use crate::error::{Error, Result};

const TRANSPORT_FAILURE_MESSAGE: &str = "Network error. Please try again.";

enum Backend {
    Remote {
        base_url: String,
        http: reqwest::Client,
    },
    Fixture {
        directory: UserDirectory,
        secret: String,
        token_ttl_secs: i64,
    },
}

/// Client for the portal backend, holding the persisted session store
pub struct PortalClient {
    backend: Backend,
    store: SessionStore,
}

impl PortalClient {
    /// Build a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = SessionStore::new(&config.client.session_file);
        let backend = match config.client.mode {
            BackendMode::Remote => Backend::Remote {
                base_url: config.client.base_url.trim_end_matches('/').to_string(),
                http: reqwest::Client::new(),
            },
            BackendMode::Fixture => Backend::Fixture {
                directory: UserDirectory::with_demo_accounts()?,
                secret: config.auth.secret.clone(),
                token_ttl_secs: config.auth.token_ttl_secs,
            },
        };

        Ok(Self { backend, store })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Log in and persist the resulting session.
    ///
    /// The claim is written only on success; a rejected login leaves the
    /// store untouched. A transport failure is terminal for the call, with
    /// no automatic retry.
    pub async fn login(&self, username: &str, password: &str, role: Role) -> Result<Identity> {
        let session = match &self.backend {
            Backend::Remote { base_url, http } => {
                let request = LoginRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                    role,
                };
                let response = http
                    .post(format!("{}/api/auth/login", base_url))
                    .json(&request)
                    .send()
                    .await
                    .map_err(|_| Error::Transport(TRANSPORT_FAILURE_MESSAGE.to_string()))?;
                let body: LoginResponse = response
                    .json()
                    .await
                    .map_err(|_| Error::Transport(TRANSPORT_FAILURE_MESSAGE.to_string()))?;

                match body {
                    LoginResponse {
                        success: true,
                        user: Some(user),
                        token,
                        ..
                    } => Session {
                        identity: user,
                        token,
                    },
                    LoginResponse { message, .. } => {
                        return Err(Error::LoginRejected(
                            message.unwrap_or_else(|| "Login failed".to_string()),
                        ))
                    }
                }
            }
            Backend::Fixture {
                directory,
                secret,
                token_ttl_secs,
            } => {
                let identity = directory.login(username, password, role)?;
                let token = issue_token(&identity, secret.as_bytes(), *token_ttl_secs)?;
                Session {
                    identity,
                    token: Some(token),
                }
            }
        };

        self.store.save(&session)?;
        Ok(session.identity)
    }

    /// Synchronous read of the persisted identity
    pub fn current_identity(&self) -> Option<Identity> {
        self.store.current_identity()
    }

    /// Clear the persisted session.
    ///
    /// The server is not notified; an issued token stays valid until it
    /// expires.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()
    }

    /// Re-derive the caller's identity from the stored token
    pub async fn me(&self) -> Result<Identity> {
        let session = self.store.current().ok_or(Error::MissingCredential)?;
        let token = session.token.ok_or(Error::MissingCredential)?;

        match &self.backend {
            Backend::Remote { base_url, http } => {
                let response = http
                    .get(format!("{}/api/auth/me", base_url))
                    .bearer_auth(&token)
                    .send()
                    .await
                    .map_err(|_| Error::Transport(TRANSPORT_FAILURE_MESSAGE.to_string()))?;

                if response.status() == reqwest::StatusCode::UNAUTHORIZED {
                    return Err(Error::InvalidCredential);
                }

                let body: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|_| Error::Transport(TRANSPORT_FAILURE_MESSAGE.to_string()))?;
                let user = body.get("user").cloned().ok_or(Error::InvalidCredential)?;
                Ok(serde_json::from_value(user)?)
            }
            Backend::Fixture { secret, .. } => {
                Ok(verify_token(&token, secret.as_bytes())?.identity())
            }
        }
    }

    /// Roster lookup for the admin surface.
    ///
    /// Remote mode requires a persisted admin session; the backend's role
    /// gate makes the final call.
    pub async fn roster(&self, role: Role) -> Result<Vec<Identity>> {
        match &self.backend {
            Backend::Fixture { directory, .. } => Ok(directory
                .by_role(role)
                .into_iter()
                .map(|record| record.identity())
                .collect()),
            Backend::Remote { base_url, http } => {
                let path = match role {
                    Role::Student => "/api/admin/students",
                    Role::Staff => "/api/admin/teachers",
                    Role::Admin => {
                        return Err(Error::Other(
                            "the admin roster is not exposed over the API".to_string(),
                        ))
                    }
                };
                let session = self.store.current().ok_or(Error::MissingCredential)?;
                let token = session.token.ok_or(Error::MissingCredential)?;

                let response = http
                    .get(format!("{}{}", base_url, path))
                    .bearer_auth(&token)
                    .send()
                    .await
                    .map_err(|_| Error::Transport(TRANSPORT_FAILURE_MESSAGE.to_string()))?;

                match response.status() {
                    reqwest::StatusCode::UNAUTHORIZED => Err(Error::InvalidCredential),
                    reqwest::StatusCode::FORBIDDEN => Err(Error::RoleMismatch {
                        required: Role::Admin,
                    }),
                    _ => {
                        let body: serde_json::Value = response
                            .json()
                            .await
                            .map_err(|_| Error::Transport(TRANSPORT_FAILURE_MESSAGE.to_string()))?;
                        let users = body
                            .get("users")
                            .cloned()
                            .unwrap_or(serde_json::Value::Array(Vec::new()));
                        Ok(serde_json::from_value(users)?)
                    }
                }
            }
        }
    }
}
