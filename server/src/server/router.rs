use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::app::SharedState;
use super::{api, assets};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Screens ---
        .route("/", get(api::screens::index))
        .route("/generate", post(api::screens::generate))
        // --- Labels ---
        .route("/labels/{name}", get(api::labels::get_label))
        .route("/labels/{name}/delete", post(api::labels::delete_label))
        // --- Static ---
        .route("/assets/{*path}", get(assets::asset_handler))
        // --- Middleware ---
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
