//! Outbound JSON payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A presigned upload as produced by the signer, before it is wrapped for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    /// The presigned URL.
    pub uri: String,
    /// HTTP method the URL was signed for.
    pub method: String,
    /// Headers the caller must send along with the upload.
    pub headers: BTreeMap<String, Vec<String>>,
}

impl PresignedUpload {
    /// Build a presigned upload from the signer's flat `(name, value)` header list.
    ///
    /// Repeated header names are collected in order.
    #[must_use]
    pub fn new<'a>(
        uri: impl Into<String>,
        method: impl Into<String>,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            grouped
                .entry(name.to_owned())
                .or_default()
                .push(value.to_owned());
        }
        Self {
            uri: uri.into(),
            method: method.into(),
            headers: grouped,
        }
    }
}

/// Success payload.
///
/// ```json
/// {"success": true, "uri": "https://...", "method": "PUT", "headers": {"x-amz-acl": ["private"]}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUploadResponse {
    /// Always `true`.
    pub success: bool,
    /// The presigned URL.
    pub uri: String,
    /// HTTP method to use with `uri`.
    pub method: String,
    /// Headers that must accompany the upload.
    pub headers: BTreeMap<String, Vec<String>>,
}

impl From<PresignedUpload> for SignedUploadResponse {
    fn from(upload: PresignedUpload) -> Self {
        Self {
            success: true,
            uri: upload.uri,
            method: upload.method,
            headers: upload.headers,
        }
    }
}

/// Failure payload: `{"success": false, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable reason.
    pub message: String,
}

impl ErrorResponse {
    /// Create an error payload carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
