use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/spaces: Ampulario storage spaces (cabinets and vehicle kits).
pub async fn list_spaces(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    Ok(Json(serde_json::to_value(store.spaces())?))
}
