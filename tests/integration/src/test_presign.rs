//! Presign happy path integration tests.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use upload_signer_core::PresignerConfig;

    use crate::{post_json, spawn_server, upload_request};

    fn header_names(json: &serde_json::Value) -> BTreeSet<String> {
        json["headers"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_should_presign_well_formed_request() {
        let base = spawn_server(PresignerConfig::default()).await;
        let (status, json) = post_json(&base, upload_request().to_string()).await;

        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
        assert_eq!(json["method"], "PUT");

        let uri = json["uri"].as_str().unwrap();
        assert!(uri.contains("mybucket"), "{uri}");
        assert!(uri.contains("path/to/object"), "{uri}");

        let headers = json["headers"].as_object().unwrap();
        assert!(!headers.is_empty());
        assert_eq!(json["headers"]["x-amz-acl"][0], "private");
    }

    #[tokio::test]
    async fn test_should_serve_every_path() {
        let base = spawn_server(PresignerConfig::default()).await;
        let (status, json) = post_json(&format!("{base}/some/nested"), upload_request().to_string()).await;
        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_should_change_signature_but_not_shape_over_time() {
        let base = spawn_server(PresignerConfig::default()).await;

        let (_, first) = post_json(&base, upload_request().to_string()).await;
        // Signing timestamps have one-second resolution.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        let (_, second) = post_json(&base, upload_request().to_string()).await;

        assert_ne!(first["uri"], second["uri"]);
        assert_eq!(first["method"], second["method"]);
        assert_eq!(header_names(&first), header_names(&second));
    }

    #[tokio::test]
    async fn test_should_return_metadata_headers() {
        let base = spawn_server(PresignerConfig::default()).await;
        let mut body = upload_request();
        body["metadata"] = serde_json::json!({"owner": "alice", "project": "apollo", "skip": null});

        let (status, json) = post_json(&base, body.to_string()).await;
        assert_eq!(status, 200);
        assert_eq!(json["headers"]["x-amz-meta-owner"][0], "alice");
        assert_eq!(json["headers"]["x-amz-meta-project"][0], "apollo");
        assert!(json["headers"].get("x-amz-meta-skip").is_none());
    }

    #[tokio::test]
    async fn test_should_accept_zero_expiry() {
        let base = spawn_server(PresignerConfig::default()).await;
        let mut body = upload_request();
        body["expiry"] = "0s".into();

        let (status, json) = post_json(&base, body.to_string()).await;
        assert_eq!(status, 200);
        assert!(json["uri"].as_str().unwrap().contains("X-Amz-Expires=0"));
    }

    #[tokio::test]
    async fn test_should_use_path_style_when_configured() {
        let base = spawn_server(PresignerConfig {
            force_path_style: true,
        })
        .await;
        let (status, json) = post_json(&base, upload_request().to_string()).await;
        assert_eq!(status, 200);
        assert!(
            json["uri"]
                .as_str()
                .unwrap()
                .starts_with("https://storage.example.com/mybucket/path/to/object")
        );
    }
}
