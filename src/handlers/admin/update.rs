// handlers/admin/update.rs - PATCH /api/admin/systems/:id handler

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateAdminNameRequest {
    pub admin_name: String,
}

/// PATCH /api/admin/systems/:id - Update a single system's admin name
pub async fn system_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdminNameRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.admin_name.trim().is_empty() {
        return Err(ApiError::validation_error("Admin name is required"));
    }

    state.store.update_admin_name(id, &payload.admin_name).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "id": id, "admin_name": payload.admin_name }
    })))
}
