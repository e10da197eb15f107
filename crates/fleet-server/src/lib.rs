pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Ambulances
        .route("/api/ambulances", get(routes::ambulances::list_ambulances))
        .route("/api/ambulances/{id}", get(routes::ambulances::get_ambulance))
        .route(
            "/api/ambulances/{id}/steps/{step}/complete",
            post(routes::ambulances::complete_step),
        )
        .route(
            "/api/ambulances/{id}/steps/{step}/revoke",
            post(routes::ambulances::revoke_step),
        )
        .route(
            "/api/ambulances/{id}/reviews",
            get(routes::ambulances::list_reviews).post(routes::ambulances::submit_review),
        )
        .route(
            "/api/ambulances/{id}/cleanings",
            get(routes::ambulances::list_cleanings).post(routes::ambulances::log_cleaning),
        )
        .route(
            "/api/ambulances/{id}/consumables",
            get(routes::ambulances::list_consumables).post(routes::ambulances::add_consumable),
        )
        .route(
            "/api/consumables/{id}",
            delete(routes::ambulances::remove_consumable),
        )
        .route(
            "/api/ambulances/{id}/equipment",
            get(routes::ambulances::list_equipment).post(routes::ambulances::add_equipment),
        )
        .route(
            "/api/equipment/{id}/status",
            put(routes::ambulances::set_equipment_status),
        )
        // Ampulario
        .route("/api/spaces", get(routes::spaces::list_spaces))
        .route(
            "/api/materials",
            get(routes::materials::list_materials).post(routes::materials::create_material),
        )
        .route(
            "/api/materials/{id}",
            get(routes::materials::get_material)
                .put(routes::materials::update_material)
                .delete(routes::materials::delete_material),
        )
        .route(
            "/api/ampulario/alerts",
            get(routes::alerts::ampulario_alerts),
        )
        .route("/api/ampulario/import", post(routes::ampulario::import_csv))
        // Alerts
        .route("/api/alerts", get(routes::alerts::list_alerts))
        // Config
        .route("/api/config", get(routes::config::get_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the fleet API server on a listener the caller already bound, so the
/// actual port is known up front even when `port = 0` lets the OS pick.
pub async fn serve_on(app_state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(app_state);

    tracing::info!("fleet API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
