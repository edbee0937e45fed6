// Tests for the end-to-end audit pipeline

use seolens_core::{AuditError, Auditor, FetchConfig, KeywordRanker};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>  Rust Crawlers Explained  </title>
    <meta name="description" content="Learn how crawlers work">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="canonical" href="https://example.com/crawlers">
</head>
<body>
    <h1>Crawlers</h1>
    <p>A crawler visits pages. Every crawler follows links, and crawler speed matters.</p>
    <img src="/hero.png">
    <img src="/logo.png" alt="Logo">
    <img data-src="/lazy.png" alt=" ">
    <script>var crawler = "ignored";</script>
</body>
</html>"#;

fn test_auditor() -> Auditor {
    Auditor::new(FetchConfig::default().with_timeout(Duration::from_millis(500))).unwrap()
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

async fn serve_page(mock_server: &MockServer, body: &str) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(mock_server)
        .await;
}

// ============================================================================
// Successful audits
// ============================================================================

#[tokio::test]
async fn test_audit_extracts_all_signals() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, PAGE).await;

    let result = test_auditor()
        .audit(Some(&mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(result.url, mock_server.uri());
    assert_eq!(result.title, "Rust Crawlers Explained");
    assert_eq!(result.title_length, 23);
    assert_eq!(result.meta_description, "Learn how crawlers work");
    assert_eq!(result.meta_description_length, 23);
    assert_eq!(result.h1_count, 1);
    assert_eq!(result.h1_tags, vec!["Crawlers"]);
    assert_eq!(result.images_without_alt_count, 2);
    assert_eq!(result.images_without_alt[0].src, "/hero.png");
    assert_eq!(result.images_without_alt[0].index, 0);
    assert_eq!(result.images_without_alt[1].src, "/lazy.png");
    assert_eq!(result.images_without_alt[1].index, 2);
    assert!(result.has_viewport_meta);
    assert!(result.has_canonical);

    assert_eq!(result.security_status.status_code, Some(200));
    assert!(!result.security_status.https_enforced);
    assert!(!result.security_status.is_secure);

    // script contents are not visible text
    assert_eq!(result.keyword_analysis[0].word, "crawler");
    assert_eq!(result.keyword_analysis[0].count, 3);
    assert!(result.keyword_analysis.len() <= 10);
}

#[tokio::test]
async fn test_audit_serializes_camel_case_payload() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "<html><head><title>T</title></head><body><h1>A</h1><h1>B</h1></body></html>",
    )
    .await;

    let result = test_auditor()
        .audit(Some(&mock_server.uri()))
        .await
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["titleLength"], 1);
    assert_eq!(json["h1Count"], 2);
    assert_eq!(json["h1Tags"], serde_json::json!(["A", "B"]));
    assert_eq!(json["metaDescriptionLength"], 0);
    assert_eq!(json["imagesWithoutAltCount"], 0);
    assert_eq!(json["imagesWithoutAlt"], serde_json::json!([]));
    assert_eq!(json["securityStatus"]["statusCode"], 200);
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_probe_failure_does_not_fail_audit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Up</title>"))
        .mount(&mock_server)
        .await;

    let result = test_auditor()
        .audit(Some(&mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(result.title, "Up");
    assert_eq!(result.security_status.status_code, None);
    assert!(!result.security_status.is_secure);
}

#[tokio::test]
async fn test_audit_with_custom_ranker() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, "<body>seo seo seo audit audit tool</body>").await;

    let auditor = test_auditor().with_ranker(KeywordRanker::new(["seo"]).with_limit(1));
    let result = auditor.audit(Some(&mock_server.uri())).await.unwrap();

    assert_eq!(result.keyword_analysis.len(), 1);
    assert_eq!(result.keyword_analysis[0].word, "audit");
    assert_eq!(result.keyword_analysis[0].count, 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_and_invalid_input() {
    let auditor = test_auditor();

    assert!(matches!(
        auditor.audit(None).await,
        Err(AuditError::MissingInput)
    ));
    assert!(matches!(
        auditor.audit(Some("")).await,
        Err(AuditError::MissingInput)
    ));
    assert!(matches!(
        auditor.audit(Some("test")).await,
        Err(AuditError::InvalidUrlFormat(_))
    ));
}

#[tokio::test]
async fn test_error_status_becomes_fetch_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = test_auditor()
        .audit(Some(&mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::FetchFailed(_)), "got {:?}", err);
    assert_eq!(err.status_code(), 502);
    assert!(err.details().unwrap().contains("404"));
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let err = test_auditor()
        .audit(Some(&closed_port_url()))
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::UpstreamUnreachable(_)), "got {:?}", err);
    assert_eq!(err.status_code(), 502);
    assert!(err.to_string().contains("Cannot connect"));
}

#[tokio::test]
async fn test_slow_page_is_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>Slow</title>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let err = test_auditor()
        .audit(Some(&mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::UpstreamTimeout(_)), "got {:?}", err);
    assert_eq!(err.status_code(), 504);
    assert_eq!(err.details(), None);
}
