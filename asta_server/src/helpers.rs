use actix_web::{error::JsonPayloadError, HttpRequest};
use log::debug;

use crate::errors::ServerError;

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Turns a JSON body that could not be parsed into a 400 `{error}` response, rather than actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("💻️ Could not parse the JSON body of {} {}. {err}", req.method(), req.path());
    let msg = match &err {
        JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        },
        _ => "Invalid request body".to_string(),
    };
    ServerError::ValidationError(msg).into()
}
