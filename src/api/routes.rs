//! API route handlers
//!
//! Protected handlers read the verified [`Claims`] that the role-gate
//! middleware inserted into request extensions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::claims::{issue_token, Claims};
use crate::auth::models::{Identity, LoginRequest, LoginResponse, Role};
use crate::directory::UserRecord;
use crate::error::Error;
use crate::marks::NewMarksSubmission;

use super::server::SharedState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "success": true, "status": "healthy" }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<SharedState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    let state = state.read().await;

    match state
        .directory
        .login(&request.username, &request.password, request.role)
    {
        Ok(identity) => {
            let token = issue_token(
                &identity,
                state.config.auth.secret.as_bytes(),
                state.config.auth.token_ttl_secs,
            )?;
            tracing::info!("User '{}' logged in as {}", identity.username, identity.role);
            Ok((StatusCode::OK, Json(LoginResponse::ok(identity, token))))
        }
        Err(Error::LoginRejected(message)) => {
            tracing::warn!("Login rejected for '{}': {}", request.username, message);
            // Wrong role on a valid credential is a 403; everything else a 401
            let status = if message.starts_with("This user is not a") {
                StatusCode::FORBIDDEN
            } else {
                StatusCode::UNAUTHORIZED
            };
            Ok((status, Json(LoginResponse::rejected(message))))
        }
        Err(other) => Err(other),
    }
}

/// GET /api/auth/me
pub async fn me(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(json!({ "success": true, "user": claims.identity() }))
}

/// POST /api/auth/logout
///
/// Stateless: the token stays valid until expiry. The endpoint exists for
/// the audit log line.
pub async fn logout(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    tracing::info!("User '{}' logged out", claims.sub);
    Json(json!({ "success": true, "message": "Logged out successfully" }))
}

/// GET /api/student/profile
pub async fn student_profile(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, Error> {
    let state = state.read().await;
    let record = state
        .directory
        .get(&claims.sub)
        .ok_or_else(|| Error::UserNotFound(claims.sub.clone()))?;

    Ok(Json(json!({ "success": true, "profile": record.identity() })))
}

/// GET /api/staff/marks
pub async fn marks_history(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(json!({ "success": true, "submissions": state.marks.history() }))
}

/// POST /api/staff/marks
pub async fn submit_marks(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<NewMarksSubmission>,
) -> Result<impl IntoResponse, Error> {
    let mut state = state.write().await;
    let submission = request.into_submission(&claims.full_name)?;

    tracing::info!(
        "Marks recorded: {} {} for semester {} by '{}'",
        submission.subject,
        submission.exam_label,
        submission.semester,
        claims.sub
    );

    state.marks.record(submission.clone());
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "submission": submission })),
    ))
}

// Admin roster management

#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
    pub full_name: String,
    pub department: String,
    #[serde(default)]
    pub semester: Option<u8>,
    pub password: String,
}

/// GET /api/admin/students
pub async fn list_students(State(state): State<SharedState>) -> impl IntoResponse {
    roster(state, Role::Student).await
}

/// GET /api/admin/teachers
pub async fn list_teachers(State(state): State<SharedState>) -> impl IntoResponse {
    roster(state, Role::Staff).await
}

async fn roster(state: SharedState, role: Role) -> Json<serde_json::Value> {
    let state = state.read().await;
    let users: Vec<Identity> = state
        .directory
        .by_role(role)
        .into_iter()
        .map(|record| record.identity())
        .collect();

    Json(json!({ "success": true, "users": users }))
}

/// POST /api/admin/students
pub async fn add_student(
    State(state): State<SharedState>,
    Json(request): Json<NewUserRequest>,
) -> Result<impl IntoResponse, Error> {
    add_user(state, request, Role::Student).await
}

/// POST /api/admin/teachers
pub async fn add_teacher(
    State(state): State<SharedState>,
    Json(request): Json<NewUserRequest>,
) -> Result<impl IntoResponse, Error> {
    add_user(state, request, Role::Staff).await
}

async fn add_user(
    state: SharedState,
    request: NewUserRequest,
    role: Role,
) -> Result<(StatusCode, Json<serde_json::Value>), Error> {
    let mut state = state.write().await;
    let record = UserRecord::new(
        request.username,
        request.full_name,
        role,
        request.department,
        request.semester,
        &request.password,
    )?;
    let identity = record.identity();
    state.directory.insert(record)?;

    tracing::info!("Added {} '{}' to the roster", role, identity.username);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": identity })),
    ))
}

/// DELETE /api/admin/students/{username}
pub async fn remove_student(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let mut state = state.write().await;

    match state.directory.get(&username) {
        Some(record) if record.role == Role::Student => {}
        _ => return Err(Error::UserNotFound(username)),
    }

    state.directory.remove(&username)?;
    tracing::info!("Removed student '{}' from the roster", username);
    Ok(Json(json!({ "success": true, "message": "Student removed" })))
}
