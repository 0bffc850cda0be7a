//! Integration tests for the Telegram client using WireMock

#![allow(clippy::expect_used, clippy::unwrap_used)]

use integration_telegram::{
    ParseMode, TelegramClient, TelegramConfig, TelegramError, code_block, escape_markdown_v2,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, method, path},
};

const TOKEN: &str = "123456:test-token";

fn client_for(server: &MockServer) -> TelegramClient {
    TelegramClient::new(TelegramConfig {
        api_base_url: server.uri(),
        timeout_secs: 5,
    })
    .expect("Failed to create client")
}

fn ok_response() -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "result": {
            "message_id": 77,
            "date": 1_773_136_800,
            "chat": {"id": 42, "type": "private"},
            "text": "hello"
        }
    })
}

#[tokio::test]
async fn send_message_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_json(serde_json::json!({
            "chat_id": "42",
            "text": "hello",
            "parse_mode": "MarkdownV2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sent = client_for(&mock_server)
        .send_message(TOKEN, "42", "hello", Some(ParseMode::MarkdownV2))
        .await
        .expect("send");

    assert_eq!(sent.message_id, 77);
}

#[tokio::test]
async fn send_escaped_report() {
    let mock_server = MockServer::start().await;
    let text = format!(
        "{}\n{}",
        escape_markdown_v2("Dominant wind: W (1 easterly, 2 westerly days)"),
        code_block("2026-03-10 |     18.4 | W\n")
    );

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_partial_json(serde_json::json!({
            "text": "Dominant wind: W \\(1 easterly, 2 westerly days\\)\n```\n2026-03-10 |     18.4 | W\n```"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .send_message(TOKEN, "42", &text, Some(ParseMode::MarkdownV2))
        .await
        .expect("send");
}

#[tokio::test]
async fn api_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities: Character '.' is reserved"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .send_message(TOKEN, "42", "broken.", Some(ParseMode::MarkdownV2))
        .await
        .unwrap_err();

    match err {
        TelegramError::Api { code, description } => {
            assert_eq!(code, 400);
            assert!(description.contains("can't parse entities"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unauthorized_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .send_message(TOKEN, "42", "hello", None)
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Api { code: 401, .. }));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 7",
            "parameters": {"retry_after": 7}
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .send_message(TOKEN, "42", "hello", None)
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::RateLimited { retry_after: Some(7) }));
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .send_message(TOKEN, "42", "hello", None)
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::InvalidResponse(_)));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn blank_chat_id_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .send_message(TOKEN, "", "hello", None)
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Configuration(_)));
}

#[tokio::test]
async fn connection_refused() {
    let client = TelegramClient::new(TelegramConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    })
    .unwrap();

    let err = client
        .send_message(TOKEN, "42", "hello", None)
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert!(!err.to_string().contains(TOKEN));
}
