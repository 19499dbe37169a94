//! Server configuration.
//!
//! Every option is a command-line flag with an environment fallback.

use clap::Parser;
use upload_signer_core::PresignerConfig;

/// Host used when the listen address leaves it out (`:80`).
const ANY_HOST: &str = "0.0.0.0";

/// Port used when the listen address is empty.
const DEFAULT_PORT: u16 = 80;

/// Presigned upload URL service.
#[derive(Debug, Clone, Parser)]
#[command(name = "upload-signer-server", version, about)]
pub struct ServerConfig {
    /// Address to serve at.
    #[arg(long, env = "UPLOAD_SIGNER_ADDRESS", default_value = ":80")]
    pub address: String,

    /// Log level filter, used when `RUST_LOG` is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Address buckets as `endpoint/bucket/key` instead of `bucket.endpoint/key`.
    #[arg(long, env = "S3_FORCE_PATH_STYLE")]
    pub force_path_style: bool,
}

impl ServerConfig {
    /// The address to bind, with an empty host replaced by all interfaces.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        match self.address.as_str() {
            "" => format!("{ANY_HOST}:{DEFAULT_PORT}"),
            addr if addr.starts_with(':') => format!("{ANY_HOST}{addr}"),
            addr => addr.to_owned(),
        }
    }

    /// Options for the presigner.
    #[must_use]
    pub fn presigner_config(&self) -> PresignerConfig {
        PresignerConfig {
            force_path_style: self.force_path_style,
        }
    }
}
