mod common;

use std::path::Path;

use bookcheck_core::vision::EncodedImage;
use bookcheck_core::{IdentifyError, ImageFormat, ParseError, VisionClient, VisionConfig};
use common::MockTransport;

fn config() -> VisionConfig {
    VisionConfig {
        api_key: "sk-test".into(),
        base_url: "https://llm.example.org/v1".into(),
        ..Default::default()
    }
}

fn completion(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn image() -> EncodedImage {
    EncodedImage::from_bytes(ImageFormat::Jpeg, b"\xff\xd8\xff")
}

#[tokio::test]
async fn unsupported_format_fails_before_any_request() {
    let transport = MockTransport::ok(&completion("[]"));
    let client = VisionClient::with_transport(config(), transport.boxed());

    let result = client.identify_books(Path::new("shelf.bmp")).await;

    assert!(matches!(result, Err(IdentifyError::UnsupportedImageFormat(_))));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn identifies_books_from_fenced_reply() {
    let reply = "```json\n[{\"title\": \"The Wild Robot\", \"author\": \"Peter Brown\", \"confidence\": 0.92},\n {\"title\": \"Hatchet\", \"confidence\": 0.6}]\n```";
    let transport = MockTransport::ok(&completion(reply));
    let client = VisionClient::with_transport(config(), transport.boxed());

    let books = client.identify_image(&image()).await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "The Wild Robot");
    assert_eq!(books[0].author.as_deref(), Some("Peter Brown"));
    assert_eq!(books[1].title, "Hatchet");

    let calls = transport.calls();
    assert_eq!(calls[0].url, "https://llm.example.org/v1/chat/completions");
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["model"], "gpt-4o");
    assert!(body["messages"][1]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn reads_image_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.png");
    std::fs::write(&path, b"\x89PNG").unwrap();

    let transport = MockTransport::ok(&completion(r#"[{"title": "A", "confidence": 0.5}]"#));
    let client = VisionClient::with_transport(config(), transport.boxed());

    let books = client.identify_books(&path).await.unwrap();

    assert_eq!(books.len(), 1);
    let body = transport.calls()[0].body.clone().unwrap();
    assert!(body["messages"][1]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn malformed_model_output_is_a_parse_error() {
    let transport = MockTransport::ok(&completion(r#"[{"author": "No Title", "confidence": 0.5}]"#));
    let client = VisionClient::with_transport(config(), transport.boxed());

    let result = client.identify_image(&image()).await;

    assert!(matches!(
        result,
        Err(IdentifyError::Parse(ParseError::MissingField { field: "title", .. }))
    ));
}

#[tokio::test]
async fn api_error_status_propagates() {
    let transport = MockTransport::status(401, r#"{"error": {"message": "Incorrect API key"}}"#);
    let client = VisionClient::with_transport(config(), transport.boxed());

    let result = client.identify_image(&image()).await;

    match result {
        Err(IdentifyError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let transport = MockTransport::ok(r#"{"choices": []}"#);
    let client = VisionClient::with_transport(config(), transport.boxed());

    let result = client.identify_image(&image()).await;

    assert!(matches!(result, Err(IdentifyError::EmptyResponse)));
}

#[tokio::test]
async fn transport_failure_propagates() {
    let transport = MockTransport::timeout();
    let client = VisionClient::with_transport(config(), transport.boxed());

    let result = client.identify_image(&image()).await;

    assert!(matches!(result, Err(IdentifyError::Transport(_))));
}
