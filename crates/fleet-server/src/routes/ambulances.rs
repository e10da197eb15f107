use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fleet_core::ambulance::Ambulance;
use fleet_core::cleaning::NewCleaning;
use fleet_core::material::{NewConsumable, NewEquipment};
use fleet_core::review::NewReview;
use fleet_core::types::{EquipmentStatus, WorkflowStep};

use super::{parse_body, JsonBody};
use crate::error::AppError;
use crate::state::AppState;

/// Ambulance record plus its derived `stage`.
fn ambulance_json(ambulance: &Ambulance) -> Result<serde_json::Value, AppError> {
    let mut json = serde_json::to_value(ambulance)?;
    json["stage"] = serde_json::Value::String(ambulance.stage().as_str().to_string());
    Ok(json)
}

// ---------------------------------------------------------------------------
// Ambulances and workflow gate
// ---------------------------------------------------------------------------

/// GET /api/ambulances: list ambulances with their current stage.
pub async fn list_ambulances(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    let list = store
        .ambulances()
        .iter()
        .map(ambulance_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(serde_json::Value::Array(list)))
}

/// GET /api/ambulances/:id
pub async fn get_ambulance(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    let ambulance = store.ambulance(&id)?;
    Ok(Json(ambulance_json(ambulance)?))
}

/// POST /api/ambulances/:id/steps/:step/complete: 409 while the previous step is open.
pub async fn complete_step(
    State(app): State<AppState>,
    Path((id, step)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let step: WorkflowStep = step.parse()?;

    let mut store = app.store.write().await;
    let outcome = store.complete_step(&id, step)?;
    let ambulance = ambulance_json(store.ambulance(&id)?)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok(Json(serde_json::json!({
        "step": outcome.step,
        "stage": outcome.stage,
        "cycle_completed": outcome.cycle_completed,
        "ambulance": ambulance,
    })))
}

/// POST /api/ambulances/:id/steps/:step/revoke: clears the step and every later one.
pub async fn revoke_step(
    State(app): State<AppState>,
    Path((id, step)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let step: WorkflowStep = step.parse()?;

    let mut store = app.store.write().await;
    let revoked = store.revoke_step(&id, step)?;
    let ambulance = ambulance_json(store.ambulance(&id)?)?;
    let revision = store.revision();
    drop(store);

    if !revoked.is_empty() {
        app.notify(revision);
    }
    Ok(Json(serde_json::json!({
        "revoked": revoked,
        "ambulance": ambulance,
    })))
}

// ---------------------------------------------------------------------------
// Mechanical reviews and cleaning logs
// ---------------------------------------------------------------------------

/// GET /api/ambulances/:id/reviews
pub async fn list_reviews(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    Ok(Json(serde_json::to_value(store.reviews_for(&id)?)?))
}

/// POST /api/ambulances/:id/reviews: submit a checklist and complete the mechanical step.
pub async fn submit_review(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let review: NewReview = parse_body(body)?;

    let mut store = app.store.write().await;
    let review = store.submit_review(&id, review)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok((StatusCode::CREATED, Json(serde_json::to_value(review)?)))
}

/// GET /api/ambulances/:id/cleanings
pub async fn list_cleanings(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    Ok(Json(serde_json::to_value(store.cleanings_for(&id)?)?))
}

/// POST /api/ambulances/:id/cleanings: log a cleaning and complete the cleaning step.
pub async fn log_cleaning(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let cleaning: NewCleaning = parse_body(body)?;

    let mut store = app.store.write().await;
    let log = store.log_cleaning(&id, cleaning)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok((StatusCode::CREATED, Json(serde_json::to_value(log)?)))
}

// ---------------------------------------------------------------------------
// On-board stock
// ---------------------------------------------------------------------------

/// GET /api/ambulances/:id/consumables
pub async fn list_consumables(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    Ok(Json(serde_json::to_value(store.consumables_for(&id)?)?))
}

/// POST /api/ambulances/:id/consumables
pub async fn add_consumable(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let item: NewConsumable = parse_body(body)?;

    let mut store = app.store.write().await;
    let material = store.add_consumable(&id, item)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok((StatusCode::CREATED, Json(serde_json::to_value(material)?)))
}

/// DELETE /api/consumables/:id
pub async fn remove_consumable(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut store = app.store.write().await;
    let removed = store.remove_consumable(&id)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok(Json(serde_json::json!({
        "id": removed.id,
        "deleted": true,
    })))
}

/// GET /api/ambulances/:id/equipment
pub async fn list_equipment(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    Ok(Json(serde_json::to_value(store.equipment_for(&id)?)?))
}

/// POST /api/ambulances/:id/equipment
pub async fn add_equipment(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let item: NewEquipment = parse_body(body)?;

    let mut store = app.store.write().await;
    let equipment = store.add_equipment(&id, item)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok((StatusCode::CREATED, Json(serde_json::to_value(equipment)?)))
}

#[derive(serde::Deserialize)]
pub struct StatusBody {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// PUT /api/equipment/:id/status
pub async fn set_equipment_status(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<serde_json::Value>, AppError> {
    let body: StatusBody = parse_body(body)?;
    let status: EquipmentStatus = body.status.parse()?;

    let mut store = app.store.write().await;
    let equipment = store.set_equipment_status(&id, status, body.notes)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok(Json(serde_json::to_value(equipment)?))
}
