//! Inbound upload request.

use std::collections::HashMap;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Caller-supplied description of the upload to presign.
///
/// Every field is optional on the wire: a missing string decodes as `""` and
/// a missing (or `null`) metadata object decodes as an empty map. Field names
/// match ASCII case-insensitively, and when a field repeats the last
/// occurrence wins. Nothing is validated here; malformed values surface when
/// the presigner uses them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    /// Access key ID used to sign the URL (wire name `id`).
    pub access_key_id: String,
    /// Secret access key used to sign the URL (wire name `secret`).
    pub secret_access_key: String,
    /// Signing region, e.g. `us-east-1`.
    pub region: String,
    /// Storage API base URL. Empty means the default endpoint for the region.
    pub endpoint: String,
    /// Target bucket.
    pub bucket: String,
    /// Target object key.
    pub key: String,
    /// Canned ACL name, e.g. `private` or `public-read`.
    pub acl: String,
    /// Validity window as a duration literal, e.g. `15m` or `1h30m`.
    pub expiry: String,
    /// User metadata attached to the object. `null` values are dropped.
    pub metadata: HashMap<String, Option<String>>,
}

impl UploadRequest {
    /// Borrow the static credentials carried by this request.
    #[must_use]
    pub fn credentials(&self) -> StaticCredentials<'_> {
        StaticCredentials {
            access_key_id: &self.access_key_id,
            secret_access_key: &self.secret_access_key,
        }
    }

    /// Metadata entries that carry a value.
    #[must_use]
    pub fn object_metadata(&self) -> HashMap<String, String> {
        self.metadata
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("acl", &self.acl)
            .field("expiry", &self.expiry)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Static credentials borrowed from a single [`UploadRequest`].
///
/// They live exactly as long as the request they came from.
#[derive(Clone, Copy)]
pub struct StaticCredentials<'a> {
    /// Access key ID.
    pub access_key_id: &'a str,
    /// Secret access key.
    pub secret_access_key: &'a str,
}

impl fmt::Debug for StaticCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

impl<'de> Deserialize<'de> for UploadRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UploadRequestVisitor)
    }
}

struct UploadRequestVisitor;

impl<'de> Visitor<'de> for UploadRequestVisitor {
    type Value = UploadRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an upload request object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut req = UploadRequest::default();
        while let Some(name) = map.next_key::<String>()? {
            let field = match name.to_ascii_lowercase().as_str() {
                "id" => &mut req.access_key_id,
                "secret" => &mut req.secret_access_key,
                "region" => &mut req.region,
                "endpoint" => &mut req.endpoint,
                "bucket" => &mut req.bucket,
                "key" => &mut req.key,
                "acl" => &mut req.acl,
                "expiry" => &mut req.expiry,
                "metadata" => {
                    // A repeated object merges into the map, `null` resets it.
                    match map.next_value::<Option<HashMap<String, Option<String>>>>()? {
                        Some(entries) => req.metadata.extend(entries),
                        None => req.metadata.clear(),
                    }
                    continue;
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            // `null` leaves the current value in place.
            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }
        Ok(req)
    }
}
