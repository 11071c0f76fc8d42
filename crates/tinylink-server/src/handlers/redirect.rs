use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Top-level path segments that never resolve as short codes.
const RESERVED: [&str; 4] = ["api", "healthz", "static", "code"];

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    if RESERVED.contains(&code.as_str()) {
        return Err(ApiError::NotFound);
    }

    let Some(record) = state.store.get(&code).await? else {
        return Err(ApiError::NotFound);
    };

    // Click tracking must never fail the redirect itself.
    if let Err(err) = state.store.increment_clicks(&code).await {
        warn!(code = %code, error = %err, "click increment failed");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, record.url)]).into_response())
}
