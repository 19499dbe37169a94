//! HTTP service layer for the upload signer.
//!
//! The protocol is a single JSON endpoint: every path accepts a `POST` with an
//! upload request body and answers with a JSON payload. This crate provides:
//!
//! - **Handler trait**: the boundary between HTTP and the presigner
//! - **Service**: hyper `Service` running method check, body read and parse
//! - **Response helpers**: JSON success/error response formatting

pub mod body;
pub mod dispatch;
pub mod response;
pub mod service;

pub use body::PresignResponseBody;
pub use dispatch::PresignHandler;
pub use service::PresignHttpService;
