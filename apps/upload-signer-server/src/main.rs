//! Upload signer server - presigned object storage upload URLs on demand.
//!
//! Callers `POST` a JSON description of an upload, including their own
//! credentials, and get back a presigned `PUT` URL plus the headers to send
//! with it. Nothing is stored between requests.
//!
//! # Usage
//!
//! ```text
//! upload-signer-server --address :8080
//! ```
//!
//! # Options
//!
//! | Flag | Variable | Default | Description |
//! |------|----------|---------|-------------|
//! | `--address` | `UPLOAD_SIGNER_ADDRESS` | `:80` | Bind address |
//! | `--log-level` | `LOG_LEVEL` | `info` | Log level filter |
//! | `--force-path-style` | `S3_FORCE_PATH_STYLE` | `false` | Path-style bucket addressing |
//! | | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use upload_signer_core::S3UploadPresigner;
use upload_signer_http::PresignHttpService;

use crate::config::ServerConfig;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `--log-level` value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: PresignHttpService<S3UploadPresigner>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    init_tracing(&config.log_level)?;

    let presigner = S3UploadPresigner::new(config.presigner_config());
    let service = PresignHttpService::new(Arc::new(presigner));

    let addr = config.listen_addr();
    info!(
        address = %addr,
        force_path_style = config.force_path_style,
        version = VERSION,
        "starting upload signer",
    );

    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(addr = %listener.local_addr()?, "listening for connections");

    serve(listener, service).await
}
