//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Token issuance and verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for bearer tokens
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

fn default_secret() -> String {
    "studentportal-dev-secret-change-in-production".to_string()
}

fn default_token_ttl() -> i64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

/// CORS allow-list. Not part of the authentication contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Which backend the portal client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Real HTTP calls to the configured base URL
    Remote,
    /// In-process demo directory, no network
    Fixture,
}

/// Portal client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_mode")]
    pub mode: BackendMode,

    /// Where the session file lives
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_mode() -> BackendMode {
    BackendMode::Remote
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".studentportal/session.json")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mode: default_mode(),
            session_file: default_session_file(),
        }
    }
}

/// Credential directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Seed the well-known demo accounts at startup
    #[serde(default = "default_seed_demo_accounts")]
    pub seed_demo_accounts: bool,
}

fn default_seed_demo_accounts() -> bool {
    true
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            seed_demo_accounts: default_seed_demo_accounts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.client.mode, BackendMode::Remote);
        assert!(config.directory.seed_demo_accounts);
        assert_eq!(config.cors.allowed_origins.len(), 3);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [client]
            mode = "fixture"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.client.mode, BackendMode::Fixture);
        assert_eq!(config.auth.token_ttl_secs, 3600);
    }
}
