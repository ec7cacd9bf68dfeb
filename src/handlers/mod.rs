// Handler tiers: public (no authentication) and admin (x-admin-key gated).

pub mod admin;
pub mod public;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::AuthProvider;
use crate::config::SecurityConfig;
use crate::store::SystemsStore;

/// Shared handler state. Collaborators sit behind trait objects, and the
/// security settings ride along, so tests can run the router against
/// in-memory doubles without touching process environment.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn SystemsStore>,
    pub security: SecurityConfig,
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", post(public::login_post))
        // Admin tier, passphrase-gated
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/systems", get(admin::systems_list))
        .route(
            "/api/admin/systems/:id",
            patch(admin::system_update).delete(admin::system_delete),
        )
        .layer(middleware::from_fn_with_state(
            state,
            crate::middleware::admin_key::admin_key_middleware,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Sadhana Tracking System API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "/auth/login (public - auth code verification)",
                "admin": "/api/admin/systems[/:id] (restricted, requires x-admin-key)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
