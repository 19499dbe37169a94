//! Error path integration tests.

#[cfg(test)]
mod tests {
    use upload_signer_core::PresignerConfig;

    use crate::{decode, post_json, spawn_server, upload_request};

    #[tokio::test]
    async fn test_should_reject_non_post_methods() {
        let base = spawn_server(PresignerConfig::default()).await;
        let client = reqwest::Client::new();

        for method in [
            reqwest::Method::GET,
            reqwest::Method::PUT,
            reqwest::Method::DELETE,
            reqwest::Method::PATCH,
        ] {
            let resp = client
                .request(method.clone(), format!("{base}/"))
                .send()
                .await
                .unwrap();
            let (status, json) = decode(resp).await;
            assert_eq!(status, 400, "{method}");
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "unknown method");
        }
    }

    #[tokio::test]
    async fn test_should_reject_malformed_json() {
        let base = spawn_server(PresignerConfig::default()).await;
        let (status, json) = post_json(&base, "this is not json".to_owned()).await;
        assert_eq!(status, 400);
        assert_eq!(json["success"], false);
        assert!(!json["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_unparseable_expiry() {
        let base = spawn_server(PresignerConfig::default()).await;
        let mut body = upload_request();
        body["expiry"] = "notaduration".into();

        let (status, json) = post_json(&base, body.to_string()).await;
        assert_eq!(status, 400);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], r#"time: invalid duration "notaduration""#);
    }

    #[tokio::test]
    async fn test_should_report_invalid_endpoint_as_internal_error() {
        let base = spawn_server(PresignerConfig::default()).await;
        let mut body = upload_request();
        body["endpoint"] = "http://bad host".into();

        let (status, json) = post_json(&base, body.to_string()).await;
        assert_eq!(status, 500);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_should_report_signing_failure_as_internal_error() {
        let base = spawn_server(PresignerConfig::default()).await;
        let mut body = upload_request();
        body["expiry"] = "200h".into();

        let (status, json) = post_json(&base, body.to_string()).await;
        assert_eq!(status, 500);
        assert_eq!(json["success"], false);
        assert!(!json["message"].as_str().unwrap().is_empty());
    }
}
