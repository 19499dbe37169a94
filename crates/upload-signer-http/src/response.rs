//! Response serialization and error formatting.

use serde::Serialize;
use upload_signer_model::{ErrorResponse, PresignError};

use crate::body::PresignResponseBody;

/// Content type for every response.
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize a [`PresignError`] into the JSON error payload:
///
/// ```json
/// {"success": false, "message": "unknown method"}
/// ```
#[must_use]
pub fn error_to_json(error: &PresignError) -> Vec<u8> {
    serde_json::to_vec(&ErrorResponse::new(error.message.as_str()))
        .expect("JSON serialization of error cannot fail")
}

/// Convert a [`PresignError`] into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &PresignError) -> http::Response<PresignResponseBody> {
    http::Response::builder()
        .status(error.status_code)
        .header("content-type", CONTENT_TYPE)
        .body(PresignResponseBody::from_json(error_to_json(error)))
        .expect("valid error response")
}

/// Serialize `payload` into a `200 OK` JSON response.
pub fn json_response<T: Serialize>(
    payload: &T,
) -> Result<http::Response<PresignResponseBody>, PresignError> {
    let json = serde_json::to_vec(payload).map_err(PresignError::serialization)?;
    Ok(http::Response::builder()
        .status(http::StatusCode::OK)
        .header("content-type", CONTENT_TYPE)
        .body(PresignResponseBody::from_json(json))
        .expect("valid JSON response"))
}
