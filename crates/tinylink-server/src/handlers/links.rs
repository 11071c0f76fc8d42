use crate::error::{ApiError, Result};
use crate::model::{CreateLinkRequest, CreateLinkResponse};
use crate::state::AppState;
use crate::validate::{validate_code, validate_url};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tinylink_core::codegen::assign_code;
use tinylink_core::LinkRecord;

pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<Vec<LinkRecord>>> {
    Ok(Json(state.store.get_all().await?))
}

pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkRecord>> {
    match state.store.get(&code).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>)> {
    validate_url(&request.url)?;

    let supplied = request
        .code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());

    let code = match supplied {
        Some(code) => {
            validate_code(code)?;
            if state.store.exists(code).await? {
                return Err(ApiError::Conflict(code.to_owned()));
            }
            code.to_owned()
        }
        None => assign_code(state.store.as_ref()).await?,
    };

    // The insert itself can still conflict with a racing creation; the
    // primary-key constraint is the authority, not the check above.
    let record = state.store.insert(&code, &request.url).await?;
    let short_url = state.short_url(&record.code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse { record, short_url }),
    ))
}

pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode> {
    // Pre-check so the client can tell "already absent" from "deleted".
    if !state.store.exists(&code).await? {
        return Err(ApiError::NotFound);
    }

    state.store.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
