use std::time::Duration;

use serde_json::json;
use tracker::{HomeworkSource, PollError, PracticumClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PracticumClient {
    let endpoint = format!("{}/api/user_api/homework_statuses/", server.uri());
    PracticumClient::new(&endpoint, "secret-token", Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetch_sends_cursor_and_oauth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(query_param("from_date", "1000"))
        .and(header("Authorization", "OAuth secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": 1050
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server).fetch(Some(1000)).await.expect("fetch ok");
    assert_eq!(body["current_date"], 1050);
    assert_eq!(body["homeworks"][0]["homework_name"], "hw1");
}

#[tokio::test]
async fn fetch_without_cursor_uses_current_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "homeworks": [],
            "current_date": 1
        })))
        .mount(&server)
        .await;

    let before = chrono::Utc::now().timestamp();
    client_for(&server).fetch(None).await.expect("fetch ok");
    let after = chrono::Utc::now().timestamp();

    let requests = server.received_requests().await.expect("recording enabled");
    let from_date: i64 = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "from_date")
        .map(|(_, v)| v.parse().expect("integer from_date"))
        .expect("from_date present");
    assert!(before <= from_date && from_date <= after);
}

#[tokio::test]
async fn fetch_maps_non_200_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch(Some(42)).await.expect_err("should fail");
    assert_eq!(
        err,
        PollError::EndpointHttp {
            endpoint: client.endpoint().to_string(),
            status: 503,
            from_date: 42,
        }
    );
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch(Some(1)).await.expect_err("should fail");
    assert!(matches!(err, PollError::ResponseShape(_)), "got {:?}", err);
}

#[tokio::test]
async fn fetch_reports_unreachable_endpoint() {
    // Nothing listens on port 1.
    let client = PracticumClient::new("http://127.0.0.1:1/api/", "t", Duration::from_secs(5))
        .expect("client");
    let err = client.fetch(Some(1)).await.expect_err("should fail");
    assert!(matches!(err, PollError::EndpointUnreachable { .. }), "got {:?}", err);
}
