//! Identity and login models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal roles for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Student - own dashboard and records
    Student,
    /// Staff - marks entry for their department
    Staff,
    /// Admin - roster management
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Staff => write!(f, "staff"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Verified identity of a caller: who they are and in what role.
///
/// Derived from token verification on the backend, or read from the
/// persisted session on the client. Never stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Login identifier (subject)
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Role the identity was issued for
    pub role: Role,
    /// Department, e.g. "BCA"
    pub department: String,
    /// Current semester (students only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u8>,
}

/// Login credentials
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Login response: `{ success, user?, token?, message? }`
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn ok(user: Identity, token: String) -> Self {
        Self {
            success: true,
            user: Some(user),
            token: Some(token),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            token: None,
            message: Some(message.into()),
        }
    }
}
