//! PUT presigner bridging the HTTP layer to the storage SDK.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::ObjectCannedAcl;
use upload_signer_http::dispatch::PresignHandler;
use upload_signer_model::{PresignError, PresignedUpload, UploadRequest};

use crate::client::build_client;
use crate::config::PresignerConfig;
use crate::expiry::Expiry;

/// Presigns `PUT` uploads with the credentials carried by each request.
#[derive(Debug, Clone, Default)]
pub struct S3UploadPresigner {
    config: Arc<PresignerConfig>,
}

impl S3UploadPresigner {
    /// Create a presigner.
    #[must_use]
    pub fn new(config: PresignerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Produce a presigned `PUT` URL and the headers that must go with it.
    ///
    /// Steps run in a fixed order, so a bad endpoint is reported before a bad
    /// expiry: client setup, operation build, expiry parse, sign.
    pub async fn presign(&self, request: &UploadRequest) -> Result<PresignedUpload, PresignError> {
        let client = build_client(
            request.credentials(),
            &request.region,
            &request.endpoint,
            &self.config,
        )
        .map_err(PresignError::configuration)?;

        let acl = (!request.acl.is_empty()).then(|| ObjectCannedAcl::from(request.acl.as_str()));
        let metadata = request.object_metadata();
        let operation = client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .set_acl(acl)
            .set_metadata((!metadata.is_empty()).then_some(metadata));

        let expiry: Expiry = request
            .expiry
            .parse()
            .map_err(PresignError::invalid_expiry)?;
        if expiry.is_negative() {
            tracing::debug!(%expiry, "negative expiry, signing an already expired URL");
        }

        let presigning = PresigningConfig::expires_in(expiry.signing_window())
            .map_err(|e| PresignError::signing(DisplayErrorContext(&e).to_string()))?;
        let presigned = operation
            .presigned(presigning)
            .await
            .map_err(|e| PresignError::signing(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            bucket = %request.bucket,
            key = %request.key,
            expires_in = expiry.signing_window().as_secs(),
            "presigned upload"
        );

        Ok(PresignedUpload::new(
            presigned.uri(),
            presigned.method(),
            presigned.headers(),
        ))
    }
}

impl PresignHandler for S3UploadPresigner {
    fn presign_upload(
        &self,
        request: UploadRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PresignedUpload, PresignError>> + Send>> {
        let presigner = self.clone();
        Box::pin(async move { presigner.presign(&request).await })
    }
}
