use axum::extract::{Multipart, State};
use axum::Json;
use fleet_core::error::FleetError;

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/ampulario/import: bulk-load materials from a CSV upload.
///
/// Expects a multipart form with the CSV in the `file` field. The batch is
/// all-or-nothing: any bad row rejects the whole file with a 400 listing
/// every problem under `details`.
pub async fn import_csv(
    State(app): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("failed to read upload: {e}")))?;
            data = Some(bytes);
            break;
        }
    }
    let data = data.ok_or_else(|| AppError::bad_request("multipart field 'file' is required"))?;

    let mut store = app.store.write().await;
    let parsed = fleet_core::import::parse_csv(&data, &app.config.import, store.spaces());
    let inputs = match parsed {
        Ok(inputs) => inputs,
        Err(e) => {
            if let FleetError::ImportRejected { details, .. } = &e {
                tracing::warn!(problems = details.len(), "ampulario import rejected");
            }
            return Err(e.into());
        }
    };
    let imported = store.import_materials(inputs)?;
    let revision = store.revision();
    drop(store);

    tracing::info!(imported, "ampulario import applied");
    app.notify(revision);
    Ok(Json(serde_json::json!({ "imported": imported })))
}
