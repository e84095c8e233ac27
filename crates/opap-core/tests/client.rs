//! Request execution against a mock HTTP server.

use opap_core::{OpapClient, OpapError};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Foo {
    bar: String,
}

async fn setup() -> (MockServer, OpapClient) {
    let server = MockServer::start().await;
    let client = OpapClient::new(None)
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap();
    (server, client)
}

#[tokio::test]
async fn test_execute_decodes_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bar":"baz"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let req = client.new_request(Method::GET, "", None).unwrap();
    let (foo, resp): (Foo, _) = client.execute(req).await.unwrap();

    assert_eq!(foo, Foo { bar: "baz".to_string() });
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_decodes_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/foo/bar.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bar":"qux"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (foo, _): (Foo, _) = client.get("foo/bar.json").await.unwrap();
    assert_eq!(foo.bar, "qux");
}

#[tokio::test]
async fn test_execute_not_found_returns_response() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let req = client.new_request(Method::GET, "missing", None).unwrap();
    let err = client.send(req).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match &err {
        OpapError::HttpStatus {
            method,
            url,
            body,
            response,
        } => {
            assert_eq!(*method, Method::GET);
            assert_eq!(url.path(), "/missing");
            assert_eq!(body, "not found");
            assert_eq!(response.status, StatusCode::NOT_FOUND);
        }
        other => panic!("Expected HttpStatus error, got {other:?}"),
    }

    let message = err.to_string();
    assert!(message.starts_with("GET "));
    assert!(message.ends_with("/missing: 404 not found"));
}

#[tokio::test]
async fn test_execute_ignores_data_after_first_value() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"bar\":\"baz\"}\ntrailing junk"))
        .mount(&server)
        .await;

    let (foo, _): (Foo, _) = client.get("stream").await.unwrap();
    assert_eq!(foo.bar, "baz");
}

#[tokio::test]
async fn test_execute_empty_body_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client.get::<Foo>("empty").await.unwrap_err();
    assert!(matches!(err, OpapError::Decode { .. }));
}

#[tokio::test]
async fn test_execute_unexpected_html() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html>something broke</html>"),
        )
        .mount(&server)
        .await;

    let req = client.new_request(Method::GET, "", None).unwrap();
    let err = client.execute::<Foo>(req).await.unwrap_err();

    match &err {
        OpapError::Decode { body, response, .. } => {
            assert_eq!(body, "<html>something broke</html>");
            assert_eq!(response.status, StatusCode::OK);
        }
        other => panic!("Expected Decode error, got {other:?}"),
    }
    assert!(err.to_string().contains("(<html>something broke</html>)"));
}

#[tokio::test]
async fn test_execute_wrong_shape_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bar":42}"#))
        .mount(&server)
        .await;

    let err = client.get::<Foo>("shape").await.unwrap_err();
    assert!(matches!(err, OpapError::Decode { .. }));
    assert!(err.response().is_some());
}

#[tokio::test]
async fn test_send_skips_decoding() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let req = client.new_request(Method::GET, "raw", None).unwrap();
    let resp = client.send(req).await.unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.url.path(), "/raw");
}

#[tokio::test]
async fn test_execute_connection_refused() {
    // Bind then drop a listener so nothing is accepting on that port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OpapClient::new(None)
        .unwrap()
        .with_base_url(&format!("http://{addr}/"))
        .unwrap();

    let req = client.new_request(Method::GET, "", None).unwrap();
    let err = client.send(req).await.unwrap_err();

    assert!(matches!(err, OpapError::Transport(_)));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_malformed_path_makes_no_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.get::<Foo>("%foo").await.unwrap_err();
    assert!(matches!(err, OpapError::MalformedUrl { .. }));
}
