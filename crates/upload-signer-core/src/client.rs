//! Per-request storage client factory.
//!
//! A client is built from the caller's static credentials, used for exactly
//! one presign call, and dropped with the request. No network call happens
//! while building it.

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use upload_signer_model::StaticCredentials;

use crate::config::PresignerConfig;

/// Provider name attached to per-request credentials.
const CREDENTIALS_PROVIDER: &str = "upload-request";

/// Errors raised while configuring a storage client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint is not a valid URI.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// The endpoint as supplied.
        endpoint: String,
        /// Parser error.
        #[source]
        source: http::uri::InvalidUri,
    },

    /// The endpoint parsed but names no host.
    #[error("invalid endpoint {0:?}: missing host")]
    MissingHost(String),
}

/// Build a storage client for one request.
///
/// An empty `region` is left unset and an empty `endpoint` selects the
/// default endpoint for the region; both are then reported by the signer.
pub fn build_client(
    credentials: StaticCredentials<'_>,
    region: &str,
    endpoint: &str,
    config: &PresignerConfig,
) -> Result<aws_sdk_s3::Client, ClientError> {
    let credentials = Credentials::new(
        credentials.access_key_id,
        credentials.secret_access_key,
        None,
        None,
        CREDENTIALS_PROVIDER,
    );

    let mut builder = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .credentials_provider(credentials)
        .force_path_style(config.force_path_style);

    if !region.is_empty() {
        builder = builder.region(Region::new(region.to_owned()));
    }
    if let Some(endpoint) = normalize_endpoint(endpoint)? {
        builder = builder.endpoint_url(endpoint);
    }

    Ok(aws_sdk_s3::Client::from_conf(builder.build()))
}

/// Resolve the endpoint override, if any.
///
/// A scheme-less endpoint such as `minio:9000` is treated as `https://minio:9000`.
fn normalize_endpoint(endpoint: &str) -> Result<Option<String>, ClientError> {
    if endpoint.is_empty() {
        return Ok(None);
    }

    let normalized = if endpoint.contains("://") {
        endpoint.to_owned()
    } else {
        format!("https://{endpoint}")
    };

    let uri: http::Uri = normalized
        .parse()
        .map_err(|source| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            source,
        })?;
    if uri.host().is_none_or(str::is_empty) {
        return Err(ClientError::MissingHost(endpoint.to_owned()));
    }

    Ok(Some(normalized))
}
