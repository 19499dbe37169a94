//! Presigner configuration.

/// Storage-facing options shared read-only by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresignerConfig {
    /// Address buckets as `endpoint/bucket/key` instead of `bucket.endpoint/key`.
    pub force_path_style: bool,
}
