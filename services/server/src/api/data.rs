//! Document API endpoints.
//!
//! The document is read and written whole: GET returns the full snapshot,
//! POST replaces it. There is no partial update and no merge — two clients
//! writing concurrently race, and the last arrival wins.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::state::AppState;
use crate::store::DocumentUpdate;

/// Create document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify))
        .route("/data", get(get_data).post(post_data))
}

#[derive(Debug, Serialize)]
struct AckResponse {
    success: bool,
}

/// PIN presence check. Reaching the handler means the gate already passed.
///
/// GET /api/verify
async fn verify() -> impl IntoResponse {
    Json(AckResponse { success: true })
}

/// Return the full stored document.
///
/// GET /api/data
async fn get_data(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    let doc = state.store().load().map_err(|e| {
        tracing::error!(error = %e, request_id = %request_id, "Failed to load document");
        ApiError::internal("internal_error", "Failed to load document")
            .with_request_id(request_id.clone())
    })?;

    Ok(Json(doc))
}

/// Replace the stored document. Accepts both the wrapped shape and the
/// legacy bare district map.
///
/// POST /api/data
async fn post_data(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    let update = DocumentUpdate::from_wire(body).map_err(|e| {
        ApiError::bad_request("invalid_document", format!("Invalid document body: {e}"))
            .with_request_id(request_id.clone())
    })?;

    state.store().save(&update).map_err(|e| {
        tracing::error!(error = %e, request_id = %request_id, "Failed to save document");
        ApiError::internal("internal_error", "Failed to save document")
            .with_request_id(request_id.clone())
    })?;

    Ok(Json(AckResponse { success: true }))
}
