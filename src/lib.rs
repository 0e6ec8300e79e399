//! Student portal authentication service and client
//!
//! This is the library interface for the portal: the auth gateway and its
//! HTTP surface, the credential directory, staff marks entry, and the
//! session-store client.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod marks;

pub use auth::{Claims, Identity, Role};
pub use config::Config;
pub use error::{Error, Result};
