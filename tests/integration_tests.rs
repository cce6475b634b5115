use std::sync::{Arc, Mutex};

use mybmw_client::hooks::ResponseHook;
use mybmw_client::{
    ApiResponse, CarBrand, ClientConfig, ClientError, ClientOptions, MyBmwClient, Region,
    StaticToken,
};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

fn config() -> ClientConfig {
    ClientConfig::new(Arc::new(
        StaticToken::new(Region::RestOfWorld, "test-token").unwrap(),
    ))
}

fn options(server: &MockServer) -> ClientOptions {
    ClientOptions {
        base_url: Some(Url::parse(&server.uri()).unwrap()),
        ..Default::default()
    }
}

async fn respond(server: &MockServer, status: u16, body: &str) {
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sends_default_headers_and_bearer_token() {
    let server = MockServer::start().await;
    respond(&server, 200, "[]").await;

    let client =
        MyBmwClient::new(config().with_metric_units(false), Some(CarBrand::Mini), options(&server))
            .unwrap();
    let response = client.get("/eadrax-vcs/v4/vehicles").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    let header = |name: &str| headers.get(name).map(|v| v.to_str().unwrap().to_string());

    assert_eq!(header("authorization").as_deref(), Some("Bearer test-token"));
    assert_eq!(header("accept").as_deref(), Some("application/json"));
    assert_eq!(header("accept-language").as_deref(), Some("en"));
    assert_eq!(header("user-agent").as_deref(), Some("Dart/3.0 (dart:io)"));
    assert_eq!(
        header("x-user-agent").as_deref(),
        Some("android(TQ2A.230505.002);mini;4.9.2(36892);row")
    );
    assert_eq!(header("bmw-units-preferences").as_deref(), Some("d=MI;v=G"));
    assert_eq!(header("24-hour-format").as_deref(), Some("true"));
    assert_eq!(header("x-identity-provider").as_deref(), Some("gcdm"));
    assert!(header("x-correlation-id").is_some());
    assert_eq!(header("x-correlation-id"), header("bmw-correlation-id"));
}

#[tokio::test]
async fn test_caller_headers_are_used_verbatim() {
    let server = MockServer::start().await;
    respond(&server, 200, "{}").await;

    let mut headers = HeaderMap::new();
    headers.insert("x-custom", HeaderValue::from_static("yes"));
    let client = MyBmwClient::new(
        config(),
        None,
        ClientOptions {
            headers: Some(headers),
            ..options(&server)
        },
    )
    .unwrap();
    client.get("/vehicles").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent = &requests[0].headers;
    assert_eq!(sent.get("x-custom").unwrap(), "yes");
    assert!(sent.get("x-user-agent").is_none());
    assert!(sent.get("bmw-units-preferences").is_none());
    assert_eq!(sent.get("authorization").unwrap(), "Bearer test-token");
}

#[tokio::test]
async fn test_request_headers_override_client_headers() {
    let server = MockServer::start().await;
    respond(&server, 200, "{}").await;

    let client = MyBmwClient::new(config(), None, options(&server)).unwrap();
    let mut req = client.request(reqwest::Method::GET, "/vehicles").unwrap();
    req.headers_mut()
        .insert("accept-language", HeaderValue::from_static("de"));
    client.execute(req).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].headers.get("accept-language").unwrap(), "de");
    assert_eq!(
        requests[0].headers.get("accept").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_unauthorized_is_returned_not_raised() {
    let server = MockServer::start().await;
    respond(&server, 401, "{\"error\":\"expired\"}").await;

    let client = MyBmwClient::new(config(), None, options(&server)).unwrap();
    let response = client.get("/vehicles").await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), "{\"error\":\"expired\"}");
}

#[tokio::test]
async fn test_redirects_are_returned_not_followed() {
    let server = MockServer::start().await;
    Mock::given(matchers::path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(matchers::path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("followed"))
        .expect(0)
        .mount(&server)
        .await;

    let client = MyBmwClient::new(config(), None, options(&server)).unwrap();
    let response = client.get("/old").await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/new");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/old");
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    respond(&server, 200, "[]").await;

    let client = MyBmwClient::new(
        config(),
        None,
        ClientOptions {
            base_url: Some(Url::parse(&format!("{}/api", server.uri())).unwrap()),
            ..Default::default()
        },
    )
    .unwrap();
    client.get("/vehicles").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/api/vehicles");
}

#[tokio::test]
async fn test_forbidden_raises_status_error() {
    let server = MockServer::start().await;
    respond(&server, 403, "{\"error\":\"forbidden\"}").await;

    let client = MyBmwClient::new(config(), None, options(&server)).unwrap();
    let err = client.get("/vehicles").await.unwrap_err();

    assert!(matches!(err, ClientError::Status { .. }));
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.body().unwrap().as_ref(), b"{\"error\":\"forbidden\"}");
}

#[tokio::test]
async fn test_server_error_raises_status_error() {
    let server = MockServer::start().await;
    respond(&server, 502, "bad gateway").await;

    let client = MyBmwClient::new(config(), None, options(&server)).unwrap();
    let err = client
        .post_json("/remote-commands", &serde_json::json!({"action": "lock"}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test]
async fn test_rate_limit_never_raises() {
    let server = MockServer::start().await;
    respond(&server, 429, "slow down").await;
    let dir = tempfile::tempdir().unwrap();

    let plain = MyBmwClient::new(config(), None, options(&server)).unwrap();
    assert_eq!(
        plain.get("/vehicles").await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    let logging = MyBmwClient::new(
        config().with_log_response_path(dir.path()),
        None,
        options(&server),
    )
    .unwrap();
    assert_eq!(
        logging.get("/vehicles").await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_logs_response_body_under_zeroed_name() {
    let server = MockServer::start().await;
    respond(&server, 200, "{\"vin\":\"VIN12345\"}").await;
    let dir = tempfile::tempdir().unwrap();

    let client = MyBmwClient::new(
        config().with_log_response_path(dir.path()),
        Some(CarBrand::Bmw),
        options(&server),
    )
    .unwrap();
    client
        .get("/eadrax-vcs/v4/vehicles/VIN12345")
        .await
        .unwrap();
    client
        .get("/eadrax-vcs/v4/vehicles/VIN67890")
        .await
        .unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["VIN00000_bmw".to_string()]);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("VIN00000_bmw")).unwrap(),
        "{\"vin\":\"VIN12345\"}"
    );
}

#[tokio::test]
async fn test_error_responses_are_logged_before_raising() {
    let server = MockServer::start().await;
    respond(&server, 404, "not found").await;
    let dir = tempfile::tempdir().unwrap();

    let client = MyBmwClient::new(
        config().with_log_response_path(dir.path()),
        Some(CarBrand::Mini),
        options(&server),
    )
    .unwrap();
    let err = client.get("/eadrax-vcs/v4/vehicles").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("vehicles_mini")).unwrap(),
        "not found"
    );
}

#[tokio::test]
async fn test_caller_hooks_run_before_builtin_hooks() {
    let server = MockServer::start().await;
    respond(&server, 500, "").await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = {
        let seen = Arc::clone(&seen);
        move |response: &ApiResponse| -> Result<(), ClientError> {
            seen.lock().unwrap().push(response.status().as_u16());
            Ok(())
        }
    };
    let hook: Arc<dyn ResponseHook> = Arc::new(recorder);

    let client = MyBmwClient::new(
        config(),
        None,
        ClientOptions {
            hooks: vec![hook],
            ..options(&server)
        },
    )
    .unwrap();
    assert!(client.get("/vehicles").await.is_err());
    assert_eq!(*seen.lock().unwrap(), vec![500]);
}

#[tokio::test]
async fn test_transport_error_propagates() {
    // Nothing listens on port 1.
    let client = MyBmwClient::new(
        config(),
        None,
        ClientOptions {
            base_url: Some(Url::parse("http://127.0.0.1:1").unwrap()),
            ..Default::default()
        },
    )
    .unwrap();
    let err = client.get("/vehicles").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
