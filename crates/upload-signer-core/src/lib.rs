//! Presigning backend for the upload signer.
//!
//! Builds a per-request storage client from caller-supplied credentials and
//! asks it for a presigned `PUT` URL. Signing itself is done by `aws-sdk-s3`;
//! no network round trip happens on this path.

pub mod client;
pub mod config;
pub mod expiry;
pub mod handler;

pub use config::PresignerConfig;
pub use expiry::{Expiry, ExpiryError};
pub use handler::S3UploadPresigner;
