// handlers/admin/delete.rs - DELETE /api/admin/systems/:id handler

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::AppState;

/// DELETE /api/admin/systems/:id - Delete a system; devotees cascade
pub async fn system_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_system(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "id": id }
    })))
}
