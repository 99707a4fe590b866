#![cfg(feature = "server")]

use api::proxy::{AnalyticsProxy, ProxyConfig, ProxyError};
use api::{FilterSelection, SourceRef};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn proxy_for(server: &MockServer) -> AnalyticsProxy {
    AnalyticsProxy::new(ProxyConfig {
        base_url: format!("{}/api/v1", server.uri()),
        timeout: None,
    })
    .expect("client builds")
}

#[tokio::test]
async fn forwards_selection_and_relays_result() {
    let server = MockServer::start().await;

    let mut filters = FilterSelection::default();
    filters.position = "Backend Developer".into();
    filters.regions = vec!["Москва".into()];
    filters
        .sources
        .push(SourceRef::new(1, "hh.ru", "https://hh.ru", true));

    Mock::given(method("POST"))
        .and(path("/api/v1/analysis"))
        .and(body_json(json!({
            "salaryRange": [50000, 200000],
            "positions": "Backend Developer",
            "experience": [0, 5],
            "regions": ["Москва"],
            "companies": [],
            "sources": [{ "id": 1, "name": "hh.ru", "url": "https://hh.ru", "availability": true }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "items": { "total_number": 2, "average": 150000.0, "median": 150000 },
            "tables": [
                { "name": "Backend Developer", "salary": 140000, "link": "https://hh.ru/vacancy/1", "experience": 2, "region": "Москва" },
                { "name": "Backend Developer", "salary": 160000, "link": "https://hh.ru/vacancy/2", "experience": 3, "region": "Москва" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = proxy_for(&server).forward(&filters).await.expect("forward ok");
    assert!(result.success);
    assert_eq!(result.stats.count, 2);
    assert_eq!(result.rows.len(), 2);
    assert!(result.pdf_summary.is_empty());
}

#[tokio::test]
async fn non_success_status_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = proxy_for(&server)
        .forward(&FilterSelection::default())
        .await
        .expect_err("502 must fail");
    match err {
        ProxyError::Status { status, .. } => assert_eq!(status, 502),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = proxy_for(&server)
        .forward(&FilterSelection::default())
        .await
        .expect_err("garbage must fail");
    assert!(matches!(err, ProxyError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let proxy = AnalyticsProxy::new(ProxyConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout: Some(std::time::Duration::from_secs(2)),
    })
    .expect("client builds");

    let err = proxy
        .forward(&FilterSelection::default())
        .await
        .expect_err("nothing listens on port 9");
    assert!(matches!(err, ProxyError::Transport(_)));
}

#[tokio::test]
async fn slow_backend_hits_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let proxy = AnalyticsProxy::new(ProxyConfig {
        base_url: format!("{}/api/v1", server.uri()),
        timeout: Some(std::time::Duration::from_millis(300)),
    })
    .expect("client builds");

    let err = proxy
        .forward(&FilterSelection::default())
        .await
        .expect_err("response arrives after the timeout");
    match err {
        ProxyError::Transport(source) => assert!(source.is_timeout(), "{source}"),
        other => panic!("unexpected error: {other}"),
    }
}
