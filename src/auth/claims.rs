//! JWT token issuance and verification

use crate::auth::models::{Identity, Role};
use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Leeway for clock skew between issuer and verifier, in seconds.
const VALIDATION_LEEWAY_SECS: u64 = 5;

/// Claims embedded in every bearer token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Display name
    pub full_name: String,
    /// Role at issuance
    pub role: Role,
    /// Department
    pub department: String,
    /// Semester (students only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u8>,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims from an identity with the given lifetime
    pub fn from_identity(identity: &Identity, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: identity.username.clone(),
            full_name: identity.full_name.clone(),
            role: identity.role,
            department: identity.department.clone(),
            semester: identity.semester,
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// The identity this token was issued for
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.sub.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            department: self.department.clone(),
            semester: self.semester,
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Sign a bearer token for an identity
pub fn issue_token(identity: &Identity, secret: &[u8], ttl_secs: i64) -> Result<String> {
    let claims = Claims::from_identity(identity, ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| Error::Token(format!("Failed to sign token: {}", e)))
}

/// Validate and decode a bearer token.
///
/// Expired, malformed, and badly-signed tokens all collapse to
/// [`Error::InvalidCredential`]; the verification internals are not
/// surfaced to callers.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = VALIDATION_LEEWAY_SECS;

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|_| Error::InvalidCredential)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn student() -> Identity {
        Identity {
            username: "student".to_string(),
            full_name: "Student User".to_string(),
            role: Role::Student,
            department: "BCA".to_string(),
            semester: Some(5),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let identity = student();
        let token = issue_token(&identity, SECRET, 3600).expect("Failed to sign token");
        let claims = verify_token(&token, SECRET).expect("Failed to verify token");

        assert_eq!(claims.identity(), identity);
        assert!(!claims.is_expired());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_key_is_invalid() {
        let token = issue_token(&student(), SECRET, 3600).unwrap();
        let result = verify_token(&token, b"some-other-secret");
        assert!(matches!(result, Err(Error::InvalidCredential)));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        // Past the 5 second leeway
        let token = issue_token(&student(), SECRET, -60).unwrap();
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(Error::InvalidCredential)));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        for garbage in ["not-a-jwt-token", "a.b.c", ""] {
            let result = verify_token(garbage, SECRET);
            assert!(matches!(result, Err(Error::InvalidCredential)));
        }
    }
}
