use mockito::Matcher;
use secrecy::SecretString;
use serde_json::json;

use super::Google;
use crate::backends::ModelBackend;
use crate::error::ProxyError;

fn client(server: &mockito::ServerGuard) -> Google {
    Google::new(
        SecretString::new("test-key".to_string()),
        Some("gemini-2.0-flash".to_string()),
        Some(server.url()),
        None,
    )
}

#[tokio::test]
async fn sends_single_user_turn_and_unwraps_first_candidate() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "What is 2+2?" }] }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "4" }] } },
                    { "content": { "parts": [{ "text": "ignored" }] } }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let reply = client(&server).generate("What is 2+2?").await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply.model_name, "gemini-2.0-flash");
    assert_eq!(reply.content, "4");
}

#[tokio::test]
async fn concatenates_parts_in_order_without_separator() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(
            json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "Hello" }, { "text": ", " }, { "text": "world" }] } }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let reply = client(&server).generate("greet").await.unwrap();
    assert_eq!(reply.content, "Hello, world");
}

#[tokio::test]
async fn zero_candidates_degrades_to_empty_content() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(json!({ "candidates": [] }).to_string())
        .create_async()
        .await;

    let reply = client(&server).generate("anything").await.unwrap();
    assert_eq!(reply.content, "");
}

#[tokio::test]
async fn missing_fields_degrade_to_empty_content() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(json!({ "candidates": [{}] }).to_string())
        .create_async()
        .await;

    let reply = client(&server).generate("anything").await.unwrap();
    assert_eq!(reply.content, "");

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(json!({}).to_string())
        .create_async()
        .await;

    let reply = client(&server).generate("anything").await.unwrap();
    assert_eq!(reply.content, "");
}

#[tokio::test]
async fn error_status_is_an_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(429)
        .with_body(json!({ "error": { "message": "quota exceeded" } }).to_string())
        .create_async()
        .await;

    let err = client(&server).generate("anything").await.unwrap_err();
    match err {
        ProxyError::Upstream {
            message,
            raw_response,
        } => {
            assert!(message.contains("429"));
            assert!(raw_response.contains("quota exceeded"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client(&server).generate("anything").await.unwrap_err();
    assert!(matches!(err, ProxyError::Json(_)));
}
