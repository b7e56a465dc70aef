//! Shared-PIN gate for the document API.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared PIN.
pub const PIN_HEADER: &str = "x-pin";

/// Reject any request whose PIN header does not exactly match the configured
/// value. A missing header and a wrong PIN are indistinguishable to the
/// caller: both get a bare 401.
pub async fn require_pin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(PIN_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided != Some(state.pin()) {
        return Err(ApiError::unauthorized("unauthorized", "Unauthorized"));
    }

    Ok(next.run(request).await)
}
