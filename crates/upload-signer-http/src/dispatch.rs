//! Presign handler trait and dispatch.

use std::future::Future;
use std::pin::Pin;

use upload_signer_model::{PresignError, PresignedUpload, UploadRequest};

/// Trait that the presigning backend must implement.
///
/// The handler receives an already decoded [`UploadRequest`] and returns the
/// presigned URL plus the headers that must accompany the upload. It owns the
/// request, so the caller's credentials are dropped when the handler is done.
pub trait PresignHandler: Send + Sync + 'static {
    /// Presign a `PUT` upload described by `request`.
    fn presign_upload(
        &self,
        request: UploadRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PresignedUpload, PresignError>> + Send>>;
}

/// Dispatch a decoded upload request to the handler.
pub async fn dispatch_upload<H: PresignHandler>(
    handler: &H,
    request: UploadRequest,
) -> Result<PresignedUpload, PresignError> {
    tracing::debug!(
        bucket = %request.bucket,
        key = %request.key,
        region = %request.region,
        "dispatching presign request"
    );
    handler.presign_upload(request).await
}
