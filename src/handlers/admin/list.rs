// handlers/admin/list.rs - GET /api/admin/systems handler

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::AppState;

/// GET /api/admin/systems - All systems with their devotees, newest first
pub async fn systems_list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let systems = state.store.list_systems().await?;

    Ok(Json(json!({
        "success": true,
        "data": systems
    })))
}
