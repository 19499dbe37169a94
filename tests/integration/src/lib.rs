//! Integration tests for the upload signer.
//!
//! Each test starts the real service with the real presigner on an
//! ephemeral local port and talks to it over TCP with `reqwest`. Presigning
//! is local computation, so no storage backend is needed.

use std::net::SocketAddr;
use std::sync::{Arc, Once};

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use upload_signer_core::{PresignerConfig, S3UploadPresigner};
use upload_signer_http::PresignHttpService;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Start a server on `127.0.0.1:0` and return its base URL.
///
/// The accept loop runs on the test's runtime and stops with it.
pub async fn spawn_server(config: PresignerConfig) -> String {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    let service = PresignHttpService::new(Arc::new(S3UploadPresigner::new(config)));

    tokio::spawn(async move {
        let http = HttpConnBuilder::new(TokioExecutor::new());
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                continue;
            };
            let conn = http
                .serve_connection(TokioIo::new(stream), service.clone())
                .into_owned();
            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    tracing::debug!(error = %e, "test connection error");
                }
            });
        }
    });

    format!("http://{addr}")
}

/// A well-formed upload request body.
#[must_use]
pub fn upload_request() -> serde_json::Value {
    serde_json::json!({
        "id": "AKIDEXAMPLE",
        "secret": "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
        "region": "us-east-1",
        "endpoint": "https://storage.example.com",
        "bucket": "mybucket",
        "key": "path/to/object",
        "acl": "private",
        "expiry": "15m",
        "metadata": {}
    })
}

/// POST `body` to the server and return the status and decoded JSON payload.
pub async fn post_json(base_url: &str, body: String) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base_url}/"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("send request");
    decode(resp).await
}

/// Decode a response into its status and JSON payload.
pub async fn decode(resp: reqwest::Response) -> (u16, serde_json::Value) {
    let status = resp.status().as_u16();
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json"),
    );
    let json = resp.json().await.expect("JSON body");
    (status, json)
}

mod test_error;
mod test_presign;
