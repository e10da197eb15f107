use axum::extract::State;
use axum::Json;
use fleet_core::alerts::{self, Alert};
use fleet_core::types::AlertSource;

use crate::error::AppError;
use crate::state::AppState;

async fn current_alerts(app: &AppState) -> Vec<Alert> {
    let store = app.store.read().await;
    let mut list = store.alerts(&app.config.alerts);
    alerts::sort_by_priority(&mut list);
    list
}

/// GET /api/alerts: every active alert, highest severity first, then most recent.
pub async fn list_alerts(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let list = current_alerts(&app).await;
    Ok(Json(serde_json::to_value(list)?))
}

/// GET /api/ampulario/alerts: expiry alerts for Ampulario stock only.
pub async fn ampulario_alerts(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let list: Vec<Alert> = current_alerts(&app)
        .await
        .into_iter()
        .filter(|a| a.source == AlertSource::Ampulario)
        .collect();
    Ok(Json(serde_json::to_value(list)?))
}
