use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config: read-only view of the configuration the server started with.
///
/// Changes go through `.fleet/config.yaml` and a restart.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(serde_json::to_value(app.config.as_ref())?))
}
