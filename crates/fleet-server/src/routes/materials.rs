use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleet_core::ampulario::{MaterialInput, MaterialPatch};

use super::{parse_body, JsonBody};
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MaterialQuery {
    #[serde(rename = "spaceId", alias = "space_id")]
    pub space_id: Option<String>,
}

/// GET /api/materials?spaceId=X: list Ampulario materials, optionally by space.
pub async fn list_materials(
    State(app): State<AppState>,
    Query(params): Query<MaterialQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    let list = store.materials(params.space_id.as_deref());
    Ok(Json(serde_json::to_value(list)?))
}

/// POST /api/materials: create one material.
pub async fn create_material(
    State(app): State<AppState>,
    body: JsonBody,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let input: MaterialInput = parse_body(body)?;

    let mut store = app.store.write().await;
    let material = store.create_material(input)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok((StatusCode::CREATED, Json(serde_json::to_value(material)?)))
}

/// GET /api/materials/:id
pub async fn get_material(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.read().await;
    let material = store.material(&id)?;
    Ok(Json(serde_json::to_value(material)?))
}

/// PUT /api/materials/:id: partial update; absent fields are kept.
pub async fn update_material(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<serde_json::Value>, AppError> {
    let patch: MaterialPatch = parse_body(body)?;

    let mut store = app.store.write().await;
    let material = store.update_material(&id, patch)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok(Json(serde_json::to_value(material)?))
}

/// DELETE /api/materials/:id
pub async fn delete_material(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut store = app.store.write().await;
    let removed = store.delete_material(&id)?;
    let revision = store.revision();
    drop(store);

    app.notify(revision);
    Ok(Json(serde_json::json!({
        "id": removed.id,
        "deleted": true,
    })))
}
