//! Credential directory
//!
//! In-memory store of user records backing login and the admin roster
//! endpoints. Passwords are held as bcrypt hashes. The demo accounts are a
//! development fixture, not a production path.

use std::collections::HashMap;

use crate::auth::models::{Identity, Role};
use crate::error::{Error, Result};

/// Hash cost for the demo fixture. Low on purpose; the accounts are
/// well-known development credentials.
const FIXTURE_COST: u32 = 4;

/// A single directory entry
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub department: String,
    pub semester: Option<u8>,
    password_hash: String,
}

impl UserRecord {
    /// Create a record, hashing the password at the default cost
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
        department: impl Into<String>,
        semester: Option<u8>,
        password: &str,
    ) -> Result<Self> {
        Self::with_cost(username, full_name, role, department, semester, password, bcrypt::DEFAULT_COST)
    }

    fn with_cost(
        username: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
        department: impl Into<String>,
        semester: Option<u8>,
        password: &str,
        cost: u32,
    ) -> Result<Self> {
        Ok(Self {
            username: username.into().to_lowercase(),
            full_name: full_name.into(),
            role,
            department: department.into(),
            semester,
            password_hash: bcrypt::hash(password, cost)?,
        })
    }

    /// The identity claim this record resolves to
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            department: self.department.clone(),
            semester: self.semester,
        }
    }

    fn verify_password(&self, password: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, &self.password_hash)?)
    }
}

/// Directory of user records, keyed by lowercased username
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with the demo accounts (all with password "123")
    pub fn with_demo_accounts() -> Result<Self> {
        let mut directory = Self::new();
        let accounts: &[(&str, &str, Role, &str, Option<u8>)] = &[
            ("admin", "Admin User", Role::Admin, "Administration", None),
            ("teacher", "Teacher User", Role::Staff, "BCA", None),
            ("rajesh.kumar", "Rajesh Kumar", Role::Staff, "BCA", None),
            ("priya.sharma", "Priya Sharma", Role::Staff, "BBA", None),
            ("student", "Student User", Role::Student, "BCA", Some(5)),
            ("karthika", "Karthika", Role::Student, "BCA", Some(5)),
            ("aarav.sharma", "Aarav Sharma", Role::Student, "BCA", Some(1)),
            ("diya.patel", "Diya Patel", Role::Student, "BBA", Some(3)),
            ("rahul.verma", "Rahul Verma", Role::Student, "B.Com", Some(5)),
            ("priya.singh", "Priya Singh", Role::Student, "B.Com", Some(3)),
        ];
        for (username, full_name, role, department, semester) in accounts {
            directory.insert(UserRecord::with_cost(
                *username,
                *full_name,
                *role,
                *department,
                *semester,
                "123",
                FIXTURE_COST,
            )?)?;
        }
        Ok(directory)
    }

    /// Add a record; fails if the username is taken
    pub fn insert(&mut self, record: UserRecord) -> Result<()> {
        if self.users.contains_key(&record.username) {
            return Err(Error::UserAlreadyExists(record.username));
        }
        self.users.insert(record.username.clone(), record);
        Ok(())
    }

    /// Remove a record by username
    pub fn remove(&mut self, username: &str) -> Result<()> {
        self.users
            .remove(&username.to_lowercase())
            .map(|_| ())
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }

    /// Look up a record by username
    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(&username.to_lowercase())
    }

    /// All records holding the given role, sorted by username
    pub fn by_role(&self, role: Role) -> Vec<&UserRecord> {
        let mut records: Vec<_> = self.users.values().filter(|u| u.role == role).collect();
        records.sort_by(|a, b| a.username.cmp(&b.username));
        records
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolve a login attempt: credential lookup, secret equality, then
    /// role equality. Only a full match yields an identity.
    pub fn login(&self, username: &str, password: &str, role: Role) -> Result<Identity> {
        let record = self
            .get(username)
            .ok_or_else(|| Error::LoginRejected("User not found".to_string()))?;

        if !record.verify_password(password)? {
            return Err(Error::LoginRejected("Invalid password".to_string()));
        }

        if record.role != role {
            return Err(Error::LoginRejected(format!(
                "This user is not a {}. Please select the correct role.",
                role
            )));
        }

        Ok(record.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_seeded() {
        let directory = UserDirectory::with_demo_accounts().unwrap();
        assert_eq!(directory.len(), 10);
        assert_eq!(directory.by_role(Role::Student).len(), 6);
        assert_eq!(directory.by_role(Role::Staff).len(), 3);
        assert_eq!(directory.by_role(Role::Admin).len(), 1);
    }

    #[test]
    fn test_login_success() {
        let directory = UserDirectory::with_demo_accounts().unwrap();
        let identity = directory.login("student", "123", Role::Student).unwrap();
        assert_eq!(identity.username, "student");
        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.department, "BCA");
        assert_eq!(identity.semester, Some(5));
    }

    #[test]
    fn test_login_is_case_insensitive_on_username() {
        let directory = UserDirectory::with_demo_accounts().unwrap();
        assert!(directory.login("STUDENT", "123", Role::Student).is_ok());
    }

    #[test]
    fn test_login_unknown_user() {
        let directory = UserDirectory::with_demo_accounts().unwrap();
        let err = directory.login("nobody", "123", Role::Student).unwrap_err();
        assert!(matches!(&err, Error::LoginRejected(m) if m == "User not found"));
    }

    #[test]
    fn test_login_wrong_password() {
        let directory = UserDirectory::with_demo_accounts().unwrap();
        let err = directory.login("student", "wrong", Role::Student).unwrap_err();
        assert!(matches!(&err, Error::LoginRejected(m) if m == "Invalid password"));
    }

    #[test]
    fn test_login_role_mismatch() {
        let directory = UserDirectory::with_demo_accounts().unwrap();
        let err = directory.login("student", "123", Role::Staff).unwrap_err();
        assert!(matches!(&err, Error::LoginRejected(m) if m.contains("not a staff")));
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut directory = UserDirectory::with_demo_accounts().unwrap();
        let record = UserRecord::with_cost(
            "Student",
            "Someone Else",
            Role::Student,
            "BBA",
            Some(1),
            "pw",
            FIXTURE_COST,
        )
        .unwrap();
        assert!(matches!(
            directory.insert(record),
            Err(Error::UserAlreadyExists(_))
        ));
    }

    #[test]
    fn test_remove_unknown_user() {
        let mut directory = UserDirectory::new();
        assert!(matches!(
            directory.remove("ghost"),
            Err(Error::UserNotFound(_))
        ));
    }
}
