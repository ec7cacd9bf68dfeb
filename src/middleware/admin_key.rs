use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::handlers::AppState;

/// Gate for the /api/admin tier: the x-admin-key header must match the
/// passphrase carried in the shared state exactly.
pub async fn admin_key_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let entered = extract_admin_key(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing x-admin-key header"))?;

    if entered != state.security.super_admin_key {
        return Err(ApiError::unauthorized("Invalid super admin key"));
    }

    Ok(next.run(request).await)
}

fn extract_admin_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-admin-key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
