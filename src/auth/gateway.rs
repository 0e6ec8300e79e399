//! Auth gateway: credential extraction, verification, and role gates
//!
//! The gateway core never writes responses. The axum middleware at the
//! bottom is the dispatch shim that maps gateway failures onto 401/403.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::claims::{verify_token, Claims};
use crate::auth::models::Role;
use crate::config::AuthConfig;
use crate::error::{Error, Result};

/// Read the bearer credential from the `Authorization` header.
///
/// The scheme is matched case-insensitively and surplus whitespace before
/// the token is tolerated. Returns `None` for a missing or malformed header.
pub fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, rest) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim_start();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Derive the caller's identity claim from request headers.
///
/// The precondition gate for every protected operation: extraction then
/// verification. No state survives the request.
pub fn authenticate(headers: &HeaderMap, secret: &[u8]) -> Result<Claims> {
    let token = extract_credential(headers).ok_or(Error::MissingCredential)?;
    verify_token(token, secret)
}

/// Allow the request only if the claimed role equals the required role.
///
/// Exact equality; there is no role hierarchy and no multi-role grant.
pub fn authorize_role(claims: &Claims, required: Role) -> Result<()> {
    if claims.role == required {
        Ok(())
    } else {
        Err(Error::RoleMismatch { required })
    }
}

/// Middleware requiring any authenticated caller.
///
/// Verified claims are inserted into request extensions for handlers.
pub async fn require_auth(
    State(auth): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let claims = authenticate(req.headers(), auth.secret.as_bytes())?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn gate(
    required: Role,
    auth: Arc<AuthConfig>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let claims = authenticate(req.headers(), auth.secret.as_bytes())?;
    authorize_role(&claims, required)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware requiring the student role
pub async fn require_student(
    State(auth): State<Arc<AuthConfig>>,
    req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    gate(Role::Student, auth, req, next).await
}

/// Middleware requiring the staff role
pub async fn require_staff(
    State(auth): State<Arc<AuthConfig>>,
    req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    gate(Role::Staff, auth, req, next).await
}

/// Middleware requiring the admin role
pub async fn require_admin(
    State(auth): State<Arc<AuthConfig>>,
    req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    gate(Role::Admin, auth, req, next).await
}
