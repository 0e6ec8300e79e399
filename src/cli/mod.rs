//! CLI interface for the student portal

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::auth::models::Role;

#[derive(Parser)]
#[command(name = "studentportal")]
#[command(version)]
#[command(about = "Student portal authentication service and client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new studentportal.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides the config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Log in and persist the session
    Login {
        /// Login username
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Role to log in as
        #[arg(short, long, default_value = "student")]
        role: Role,
    },

    /// Show the identity of the current session
    Whoami,

    /// Clear the persisted session
    Logout,

    /// List directory users
    Users {
        /// Only show users with this role
        #[arg(short, long)]
        role: Option<Role>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
