//! Upload signer HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use tracing::Instrument;

use upload_signer_model::{PresignError, SignedUploadResponse, UploadRequest};

use crate::body::PresignResponseBody;
use crate::dispatch::{PresignHandler, dispatch_upload};
use crate::response::{CONTENT_TYPE, error_to_response, json_response};

/// Value of the `server` response header.
const SERVER_NAME: &str = "upload-signer";

/// Hyper `Service` implementation for the upload signer.
///
/// Every path is served the same way; the handler is mounted at the root,
/// which matches all paths.
#[derive(Debug)]
pub struct PresignHttpService<H: PresignHandler> {
    handler: Arc<H>,
}

impl<H: PresignHandler> PresignHttpService<H> {
    /// Create a new `PresignHttpService`.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H: PresignHandler> Clone for PresignHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: PresignHandler> hyper::service::Service<http::Request<Incoming>> for PresignHttpService<H> {
    type Response = http::Response<PresignResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "presign",
            request_id = %request_id,
            method = %req.method(),
            path = %req.uri().path(),
        );

        Box::pin(
            async move {
                let response = process_request(req, handler.as_ref()).await;
                Ok(add_common_headers(response, &request_id))
            }
            .instrument(span),
        )
    }
}

/// Process a single request through the full pipeline.
async fn process_request<B, H>(
    req: http::Request<B>,
    handler: &H,
) -> http::Response<PresignResponseBody>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
    H: PresignHandler,
{
    let (parts, incoming) = req.into_parts();

    // 1. Only POST is accepted.
    if parts.method != http::Method::POST {
        return error_response(&PresignError::unknown_method());
    }

    // 2. Collect body.
    let body = match collect_body(incoming).await {
        Ok(body) => body,
        Err(err) => return error_response(&err),
    };

    // 3. Decode the upload request.
    let request: UploadRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&PresignError::invalid_request_body(e)),
    };

    // 4. Presign and serialize.
    let result = dispatch_upload(handler, request)
        .await
        .and_then(|upload| json_response(&SignedUploadResponse::from(upload)));

    match result {
        Ok(response) => response,
        Err(err) => error_response(&err),
    }
}

/// Collect the body into a single `Bytes` buffer.
async fn collect_body<B>(incoming: B) -> Result<Bytes, PresignError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
{
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| PresignError::body_read(e.to_string()))
}

/// Log a failed request and render its error payload.
fn error_response(err: &PresignError) -> http::Response<PresignResponseBody> {
    if err.status_code.is_server_error() {
        tracing::warn!(code = %err.code, message = %err.message, "presign request failed");
    } else {
        tracing::debug!(code = %err.code, message = %err.message, "presign request rejected");
    }
    error_to_response(err)
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<PresignResponseBody>,
    request_id: &str,
) -> http::Response<PresignResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }

    headers
        .entry("content-type")
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    headers.insert("server", http::HeaderValue::from_static(SERVER_NAME));

    response
}
