pub mod alerts;
pub mod ambulances;
pub mod ampulario;
pub mod config;
pub mod events;
pub mod materials;
pub mod spaces;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// A JSON request body with axum's rejection kept, so syntax and
/// content-type failures reach `parse_body` instead of axum's plain-text
/// responses.
pub(crate) type JsonBody = Result<Json<serde_json::Value>, JsonRejection>;

/// Decode a JSON body into `T`. Every failure is a 400 with the usual
/// `{"error": ...}` body.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(body: JsonBody) -> Result<T, AppError> {
    let Json(value) = body
        .map_err(|e| AppError::bad_request(format!("invalid request body: {}", e.body_text())))?;
    serde_json::from_value(value)
        .map_err(|e| AppError::bad_request(format!("invalid request body: {e}")))
}
