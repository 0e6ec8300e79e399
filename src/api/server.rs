//! HTTP API server

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::gateway;
use crate::config::Config;
use crate::directory::UserDirectory;
use crate::error::Result;
use crate::marks::MarksStore;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub directory: UserDirectory,
    pub marks: MarksStore,
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let directory = if config.directory.seed_demo_accounts {
        UserDirectory::with_demo_accounts()?
    } else {
        UserDirectory::new()
    };

    let app = create_router(config, directory);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes and role gates.
///
/// Every protected router carries its own gate as a route layer, so the
/// middleware only runs for paths that actually match.
pub fn create_router(config: Config, directory: UserDirectory) -> Router {
    let auth = Arc::new(config.auth.clone());
    let cors = cors_layer(&config);

    let state = Arc::new(RwLock::new(AppState {
        config,
        directory,
        marks: MarksStore::new(),
    }));

    let authenticated = Router::new()
        .route("/api/auth/me", get(routes::me))
        .route("/api/auth/logout", post(routes::logout))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            gateway::require_auth,
        ));

    let student = Router::new()
        .route("/api/student/profile", get(routes::student_profile))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            gateway::require_student,
        ));

    let staff = Router::new()
        .route(
            "/api/staff/marks",
            get(routes::marks_history).post(routes::submit_marks),
        )
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            gateway::require_staff,
        ));

    let admin = Router::new()
        .route(
            "/api/admin/students",
            get(routes::list_students).post(routes::add_student),
        )
        .route("/api/admin/students/{username}", delete(routes::remove_student))
        .route(
            "/api/admin/teachers",
            get(routes::list_teachers).post(routes::add_teacher),
        )
        .route_layer(middleware::from_fn_with_state(auth, gateway::require_admin));

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/auth/login", post(routes::login))
        .merge(authenticated)
        .merge(student)
        .merge(staff)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS layer from the configured allow-list. External collaborator; not
/// part of the authentication contract.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
