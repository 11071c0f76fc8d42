use serde::{Deserialize, Serialize};
use tinylink_core::LinkRecord;

#[derive(Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct CreateLinkResponse {
    #[serde(flatten)]
    pub record: LinkRecord,
    pub short_url: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
