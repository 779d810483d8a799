//! Integration tests for Telegram delivery and command polling

use std::sync::Arc;

use coincast::core::{CommandListener, TriggerSource};
use coincast::services::telegram::TelegramError;
use coincast::services::{NotificationSink, NotifyError, TelegramClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{bot_path, telegram_config, CHAT_ID};

fn client(server: &MockServer) -> TelegramClient {
    TelegramClient::new(&telegram_config(&server.uri())).expect("telegram client")
}

#[tokio::test]
async fn send_message_passes_chat_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(bot_path("sendMessage")))
        .and(query_param("chat_id", CHAT_ID))
        .and(query_param("text", "Buy Bitcoin now!"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true, "result": { "message_id": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .deliver("Buy Bitcoin now!")
        .await
        .expect("delivered");
}

#[tokio::test]
async fn api_errors_surface_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(bot_path("sendMessage")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server).send_message("hello").await.unwrap_err();
    assert!(matches!(err, TelegramError::Api(ref d) if d == "Bad Request: chat not found"));

    let err = client(&server).deliver("hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected(_)));
}

#[tokio::test]
async fn non_json_errors_report_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(bot_path("sendMessage")))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server).send_message("hello").await.unwrap_err();
    assert!(matches!(err, TelegramError::Status(502)));
}

#[tokio::test]
async fn listener_triggers_on_command_and_advances_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(bot_path("getUpdates")))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [
                { "update_id": 10, "message": { "text": "/projection", "chat": { "id": 42 } } },
                { "update_id": 11, "message": { "text": "/projection", "chat": { "id": 7 } } },
                { "update_id": 12, "message": { "text": "hello", "chat": { "id": 42 } } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(bot_path("getUpdates")))
        .and(query_param("offset", "13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = telegram_config(&server.uri());
    let mut listener = CommandListener::new(Arc::new(client(&server)), &config);

    let triggers = listener.poll_once().await.expect("first poll");
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].source, TriggerSource::Command);
    assert_eq!(listener.offset(), Some(13));

    let triggers = listener.poll_once().await.expect("second poll");
    assert!(triggers.is_empty());
    assert_eq!(listener.offset(), Some(13));
}
