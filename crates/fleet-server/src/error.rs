use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleet_core::error::FleetError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Bodies are `{"error": "..."}`; batch rejections add a `details` array.
/// Anything that is not a known `FleetError` becomes a 500 whose cause is
/// logged and kept out of the response.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(FleetError::Validation(msg.into()).into())
    }
}

fn status_for(e: &FleetError) -> StatusCode {
    match e {
        FleetError::AmbulanceNotFound(_)
        | FleetError::MaterialNotFound(_)
        | FleetError::ConsumableNotFound(_)
        | FleetError::EquipmentNotFound(_) => StatusCode::NOT_FOUND,
        FleetError::AmbulanceExists(_)
        | FleetError::SpaceExists(_)
        | FleetError::StepLocked { .. } => StatusCode::CONFLICT,
        FleetError::InvalidStep(_)
        | FleetError::InvalidRoute(_)
        | FleetError::InvalidStatus(_)
        | FleetError::InvalidId(_)
        | FleetError::Validation(_)
        | FleetError::ImportRejected { .. }
        | FleetError::Csv(_) => StatusCode::BAD_REQUEST,
        FleetError::NotInitialized | FleetError::Io(_) | FleetError::Yaml(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let fleet = self.0.downcast_ref::<FleetError>();
        let status = fleet
            .map(status_for)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %format!("{:#}", self.0), "request failed");
            let body = serde_json::json!({ "error": "internal server error" });
            return (status, axum::Json(body)).into_response();
        }

        let body = match fleet {
            Some(FleetError::ImportRejected { message, details }) => {
                serde_json::json!({ "error": message, "details": details })
            }
            _ => serde_json::json!({ "error": self.0.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
