//! Persisted client session
//!
//! One serialized identity (plus its bearer token) under one well-known
//! path. Absence of the file means logged out, and unreadable content reads
//! the same way.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::models::Identity;
use crate::error::Result;

/// What the store persists: the claim plus the token it was issued with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// File-backed session store holding at most one session at a time
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session, replacing any prior one.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// concurrent reader never observes a partial session.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    /// The persisted session, if one exists and parses
    pub fn current(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// The persisted identity, if logged in
    pub fn current_identity(&self) -> Option<Identity> {
        self.current().map(|session| session.identity)
    }

    /// Clear the persisted session. Clearing an absent session is not an
    /// error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use tempfile::TempDir;

    fn identity(username: &str) -> Identity {
        Identity {
            username: username.to_string(),
            full_name: "Student User".to_string(),
            role: Role::Student,
            department: "BCA".to_string(),
            semester: Some(5),
        }
    }

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn test_absent_file_means_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.current().is_none());
        assert!(store.current_identity().is_none());
    }

    #[test]
    fn test_save_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let session = Session {
            identity: identity("student"),
            token: Some("abc.def.ghi".to_string()),
        };

        store.save(&session).unwrap();
        assert_eq!(store.current(), Some(session));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested/dir/session.json"));
        let session = Session {
            identity: identity("student"),
            token: None,
        };

        store.save(&session).unwrap();
        assert!(store.current().is_some());
    }

    #[test]
    fn test_save_replaces_prior_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .save(&Session {
                identity: identity("student"),
                token: None,
            })
            .unwrap();
        store
            .save(&Session {
                identity: identity("karthika"),
                token: None,
            })
            .unwrap();

        assert_eq!(store.current_identity().unwrap().username, "karthika");
    }

    #[test]
    fn test_corrupt_content_reads_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json at all {").unwrap();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_clear_removes_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&Session {
                identity: identity("student"),
                token: None,
            })
            .unwrap();

        store.clear().unwrap();
        assert!(store.current().is_none());

        // Clearing again is a no-op
        store.clear().unwrap();
    }
}
