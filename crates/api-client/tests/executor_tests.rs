// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end executor tests against a mock HTTP server

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use api_client::{
    ApiRequest, ClientConfig, ErrorKind, QueryParams, RequestExecutor,
    error::UNEXPECTED_STATUS_CODE,
    executor::{API_VERSION, PLATFORM, USER_AGENT},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, header_exists, method, path, query_param},
};

mod support;
use support::{init_tracing, test_config};

#[derive(Debug, Deserialize, PartialEq)]
struct Envelope {
    data: Value,
}

fn executor(server: &MockServer, retries: u32) -> RequestExecutor {
    init_tracing();
    RequestExecutor::with_reqwest(test_config(&server.uri(), retries, Duration::from_millis(10)))
        .unwrap()
}

#[tokio::test]
async fn sends_standard_headers_and_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfts/nft_1"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(header("accept", "application/json"))
        .and(header("x-api-version", API_VERSION))
        .and(header("x-platform", PLATFORM))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "nft_1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let envelope: Envelope =
        assert_ok!(executor(&server, 3).execute(ApiRequest::get(["nfts", "nft_1"])).await);
    assert_eq!(envelope.data, json!({"id": "nft_1"}));
}

#[tokio::test]
async fn posts_json_body_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nfts"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"tokenId": "42", "owner": "0xabc"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "n"}})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::post(["nfts"])
        .with_body(&json!({"tokenId": "42", "owner": "0xabc"}))
        .unwrap();
    assert_ok!(executor(&server, 1).execute::<Envelope>(request).await);
}

#[tokio::test]
async fn get_requests_carry_no_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfts"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nfts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(executor(&server, 1).execute::<Envelope>(ApiRequest::get(["nfts"])).await);
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/marketplace/listings"))
        .and(query_param("page", "2"))
        .and(query_param("minPrice", "0.5"))
        .and(query_param("owner", "0xabc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let query = QueryParams::new()
        .with("page", Some(2u32))
        .with("limit", None::<u32>)
        .with("minPrice", Some(0.5))
        .with("owner", Some("0xabc"));
    let request = ApiRequest::get(["marketplace", "listings"]).with_query(query);

    assert_ok!(executor(&server, 1).execute::<Envelope>(request).await);

    let received = server.received_requests().await.unwrap();
    assert!(!received[0].url.query().unwrap_or_default().contains("limit"));
}

#[tokio::test]
async fn empty_success_body_decodes_to_unit() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/nfts/nft_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        executor(&server, 1)
            .execute::<()>(ApiRequest::delete(["nfts", "nft_1"]))
            .await
    );
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfts"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = assert_err!(
        executor(&server, 3)
            .execute::<Value>(ApiRequest::get(["nfts"]))
            .await
    );
    assert_eq!(error.kind(), ErrorKind::Server);
    assert_eq!(error.message(), "maintenance");
}

#[tokio::test]
async fn error_body_code_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfts/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "NFT not found", "code": "NFT_NOT_FOUND"})),
        )
        .mount(&server)
        .await;

    let error = assert_err!(
        executor(&server, 1)
            .execute::<Value>(ApiRequest::get(["nfts", "missing"]))
            .await
    );
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(error.code(), "NFT_NOT_FOUND");
    assert_eq!(error.to_string(), "Not found: NFT not found");
}

#[tokio::test]
async fn unexpected_status_mentions_the_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(418).set_body_string("short and stout"))
        .mount(&server)
        .await;

    let error = assert_err!(
        executor(&server, 1)
            .execute::<Value>(ApiRequest::get(["nfts"]))
            .await
    );
    assert_eq!(error.kind(), ErrorKind::Server);
    assert_eq!(error.code(), UNEXPECTED_STATUS_CODE);
    assert!(error.message().contains("418"));
}

#[tokio::test]
async fn slow_server_times_out_on_every_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig::builder("test-api-key")
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .retries(2)
        .initial_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let executor = RequestExecutor::with_reqwest(Arc::new(config)).unwrap();

    let error = assert_err!(executor.execute::<Value>(ApiRequest::get(["nfts"])).await);
    assert!(error.is_timeout());
    assert_eq!(error.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    init_tracing();
    let config = test_config("http://127.0.0.1:9", 2, Duration::from_millis(10));
    let executor = RequestExecutor::with_reqwest(config).unwrap();

    let error = assert_err!(executor.execute::<Value>(ApiRequest::get(["nfts"])).await);
    assert_eq!(error.kind(), ErrorKind::Network);
    assert!(error.is_retryable());
}

/// Server that announces a 100 byte body, sends one byte, and hangs up.
/// Returns its base URL and a counter of accepted connections.
async fn truncating_server(status_line: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&connections);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{{"
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{address}"), connections)
}

#[tokio::test]
async fn truncated_success_body_is_retried_as_network_error() {
    init_tracing();
    let (base_url, connections) = truncating_server("HTTP/1.1 200 OK").await;
    let executor =
        RequestExecutor::with_reqwest(test_config(&base_url, 3, Duration::from_millis(10)))
            .unwrap();

    let error = assert_err!(
        executor
            .execute::<()>(ApiRequest::delete(["nfts", "1"]))
            .await
    );
    assert_eq!(error.kind(), ErrorKind::Network);
    assert_eq!(connections.load(Ordering::SeqCst), 3);

    let error = assert_err!(executor.execute::<Value>(ApiRequest::get(["nfts", "1"])).await);
    assert_eq!(error.kind(), ErrorKind::Network);
    assert_eq!(connections.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn truncated_error_body_still_classifies_status() {
    init_tracing();
    let (base_url, connections) = truncating_server("HTTP/1.1 503 Service Unavailable").await;
    let executor =
        RequestExecutor::with_reqwest(test_config(&base_url, 3, Duration::from_millis(10)))
            .unwrap();

    let error = assert_err!(executor.execute::<Value>(ApiRequest::get(["nfts"])).await);
    assert_eq!(error.kind(), ErrorKind::Server);
    assert_eq!(error.message(), "Unknown error");
    assert_eq!(connections.load(Ordering::SeqCst), 1);
}
