//! Integration tests for RestEmitter using wiremock to mock DataHub GMS.

use catalog_ingest_sdk::config::CatalogSettings;
use catalog_ingest_sdk::convert::transform_dcat_to_mce;
use catalog_ingest_sdk::emit::{EmitError, MetadataEmitter, RestEmitter, RestEmitterConfig, ingest};
use catalog_ingest_sdk::models::{DcatDataset, MetadataChangeEvent};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn emitter(server: &MockServer) -> RestEmitter {
    let config = RestEmitterConfig::new(server.uri()).with_retries(2, 1);
    RestEmitter::new(config).unwrap()
}

fn event(identifier: &str) -> MetadataChangeEvent {
    let dataset = DcatDataset {
        identifier: Some(identifier.to_string()),
        title: Some(format!("Dataset {}", identifier)),
        ..Default::default()
    };
    transform_dcat_to_mce(&dataset, &CatalogSettings::new("opendata", "PROD", "open-data"))
}

// ---- emit ----

#[tokio::test]
async fn test_emit_posts_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities"))
        .and(query_param("action", "ingest"))
        .and(header("X-RestLi-Protocol-Version", "2.0.0"))
        .and(body_partial_json(serde_json::json!({
            "entity": {"value": {"com.linkedin.metadata.snapshot.DatasetSnapshot": {
                "urn": "urn:li:dataset:(urn:li:dataPlatform:opendata,roads,PROD)"
            }}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    emitter(&server).emit(&event("roads")).await.unwrap();
}

#[tokio::test]
async fn test_emit_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = RestEmitterConfig::new(server.uri()).with_token("secret");
    RestEmitter::new(config)
        .unwrap()
        .emit(&event("roads"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_emit_retries_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/entities"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    emitter(&server).emit(&event("roads")).await.unwrap();
}

#[tokio::test]
async fn test_emit_gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(3)
        .mount(&server)
        .await;

    let err = emitter(&server).emit(&event("roads")).await.unwrap_err();
    assert!(matches!(err, EmitError::Http { status: 429, ref body } if body == "slow down"));
}

#[tokio::test]
async fn test_emit_auth_failure_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;

    let err = emitter(&server).emit(&event("roads")).await.unwrap_err();
    assert!(matches!(err, EmitError::Auth { status: 401, .. }));
}

#[tokio::test]
async fn test_ingest_continues_after_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities"))
        .and(body_partial_json(serde_json::json!({
            "entity": {"value": {"com.linkedin.metadata.snapshot.DatasetSnapshot": {
                "urn": "urn:li:dataset:(urn:li:dataPlatform:opendata,broken,PROD)"
            }}}
        })))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/entities"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let events = vec![event("a"), event("broken"), event("c")];
    let summary = ingest(&emitter(&server), &events).await.unwrap();

    assert_eq!(summary.emitted_count(), 2);
    let failed: Vec<&str> = summary.failed().map(|(urn, _)| urn).collect();
    assert_eq!(
        failed,
        vec!["urn:li:dataset:(urn:li:dataPlatform:opendata,broken,PROD)"]
    );
}

// ---- test_connection ----

#[tokio::test]
async fn test_connection_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "noCode": "true",
            "versions": {"linkedin/datahub": {"version": "v0.13.0"}}
        })))
        .mount(&server)
        .await;

    emitter(&server).test_connection().await.unwrap();
}

#[tokio::test]
async fn test_connection_rejects_non_gms() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "up"})))
        .mount(&server)
        .await;

    let err = emitter(&server).test_connection().await.unwrap_err();
    assert!(matches!(err, EmitError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let config = RestEmitterConfig::new("http://127.0.0.1:1").with_retries(0, 1);
    let err = RestEmitter::new(config)
        .unwrap()
        .test_connection()
        .await
        .unwrap_err();
    assert!(matches!(err, EmitError::Connection(_)));
}
