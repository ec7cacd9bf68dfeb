// handlers/public/login.rs - POST /auth/login handler

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub code: String,
}

/// POST /auth/login - Verify a tenant authentication code
///
/// Expected Input:
/// ```json
/// { "code": "string" }   // Required: tenant authentication code
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "success": true, "data": { "redirect": "/" } }
/// ```
///
/// An empty or whitespace-only code is rejected before any lookup. Unknown
/// codes return 401; collaborator failures are logged and surfaced as a
/// generic 500.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.code.trim().is_empty() {
        return Err(ApiError::validation_error("Authentication code is required"));
    }

    // Codes are uppercased as entered on the client; normalize here as well.
    let code = payload.code.to_uppercase();

    match state.auth.login(&code).await {
        Ok(true) => Ok(Json(json!({
            "success": true,
            "data": { "redirect": "/" }
        }))),
        Ok(false) => Err(ApiError::unauthorized("Invalid authentication code")),
        Err(e) => Err(e.into()),
    }
}
