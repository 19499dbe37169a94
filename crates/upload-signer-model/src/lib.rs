//! Model types for the upload signer.
//!
//! The service speaks a tiny JSON protocol: one inbound [`UploadRequest`] and
//! either a [`SignedUploadResponse`] or an [`ErrorResponse`] back. These types
//! are hand-written serde structs shared by the HTTP layer and the presigner.

pub mod error;
pub mod request;
pub mod response;

pub use error::{PresignError, PresignErrorCode};
pub use request::{StaticCredentials, UploadRequest};
pub use response::{ErrorResponse, PresignedUpload, SignedUploadResponse};
