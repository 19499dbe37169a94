//! Error type shared by the HTTP layer and the presigner.
//!
//! Every failure point in the request pipeline maps to one [`PresignErrorCode`],
//! which fixes the HTTP status. The message is sent back to the caller as is.

use std::fmt;

/// Failure points of the presign pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PresignErrorCode {
    /// The request used a method other than `POST`.
    InvalidMethod,
    /// The body is not a valid JSON upload request.
    InvalidRequestBody,
    /// The expiry is not a valid duration literal.
    InvalidExpiry,
    /// The request body could not be read.
    BodyReadFailure,
    /// The storage client could not be configured.
    ConfigurationFailure,
    /// The signer rejected the request.
    SigningFailure,
    /// The success payload could not be serialized.
    SerializationFailure,
}

impl PresignErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidMethod => "InvalidMethod",
            Self::InvalidRequestBody => "InvalidRequestBody",
            Self::InvalidExpiry => "InvalidExpiry",
            Self::BodyReadFailure => "BodyReadFailure",
            Self::ConfigurationFailure => "ConfigurationFailure",
            Self::SigningFailure => "SigningFailure",
            Self::SerializationFailure => "SerializationFailure",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::InvalidMethod | Self::InvalidRequestBody | Self::InvalidExpiry => {
                http::StatusCode::BAD_REQUEST
            }
            Self::BodyReadFailure
            | Self::ConfigurationFailure
            | Self::SigningFailure
            | Self::SerializationFailure => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for PresignErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that ends a request with an error payload.
#[derive(Debug)]
pub struct PresignError {
    /// The failure point.
    pub code: PresignErrorCode,
    /// Message returned to the caller.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for PresignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PresignError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for PresignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl PresignError {
    /// Create a new `PresignError` with a custom message.
    #[must_use]
    pub fn with_message(code: PresignErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Create an error whose message is the display text of `source`.
    #[must_use]
    pub fn from_source(
        code: PresignErrorCode,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_message(code, source.to_string()).with_source(source)
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// Non-`POST` request.
    #[must_use]
    pub fn unknown_method() -> Self {
        Self::with_message(PresignErrorCode::InvalidMethod, "unknown method")
    }

    /// Malformed JSON body.
    #[must_use]
    pub fn invalid_request_body(source: serde_json::Error) -> Self {
        Self::from_source(PresignErrorCode::InvalidRequestBody, source)
    }

    /// Unparseable expiry.
    #[must_use]
    pub fn invalid_expiry(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::from_source(PresignErrorCode::InvalidExpiry, source)
    }

    /// Body read failure.
    #[must_use]
    pub fn body_read(message: impl Into<String>) -> Self {
        Self::with_message(PresignErrorCode::BodyReadFailure, message)
    }

    /// Storage client construction failure.
    #[must_use]
    pub fn configuration(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::from_source(PresignErrorCode::ConfigurationFailure, source)
    }

    /// Signing failure.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::with_message(PresignErrorCode::SigningFailure, message)
    }

    /// Response serialization failure.
    #[must_use]
    pub fn serialization(source: serde_json::Error) -> Self {
        Self::from_source(PresignErrorCode::SerializationFailure, source)
    }
}
