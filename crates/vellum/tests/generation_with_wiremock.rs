//! Integration tests for the generators using wiremock

mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};
use vellum::Error;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
const FLASH_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

#[tokio::test]
async fn test_article_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .and(header("x-goog-api-key", common::test_api_key().as_str()))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {"required": ["title", "content"]}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::text_response(
            r###"{"title":"Tide Pools","content":"## Life\\nbetween tides"}"###,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let article = client.articles().generate("tide pools").await.unwrap();

    assert_eq!(article.title, "Tide Pools");
    assert_eq!(article.content, "## Life\nbetween tides");

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with("Write a blog post about: tide pools."));
}

#[tokio::test]
async fn test_image_returns_data_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Generate an image of: a red kite"}]}],
            "generationConfig": {"responseModalities": ["TEXT", "IMAGE"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here is your kite."},
                {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
            ]}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let image = client.images().generate("a red kite").await.unwrap();

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.url, "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn test_image_without_inline_data_is_terminal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::text_response("I can only describe a kite.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let result = client.images().generate("a red kite").await;

    assert_matches!(result, Err(Error::NoImageData));
}

#[tokio::test]
async fn test_presentation_success() {
    let mock_server = MockServer::start().await;

    let deck = json!({
        "title": "Volcanoes",
        "slides": [
            {"title": "What", "content": ["Vents in the crust"]},
            {"title": "Where", "content": ["Ring of Fire", "Iceland"]}
        ]
    });

    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::text_response(&deck.to_string())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let presentation = client.presentations().generate("volcanoes").await.unwrap();

    assert_eq!(presentation.title, "Volcanoes");
    assert_eq!(presentation.slides.len(), 2);
    assert_eq!(presentation.slides[1].content, vec!["Ring of Fire", "Iceland"]);

    let slides = presentation.into_slides();
    assert_eq!(slides[0].id, "slide-0");
}

#[tokio::test]
async fn test_overloaded_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(common::error_body(
            503,
            "UNAVAILABLE",
            "The model is overloaded. Please try again later.",
        )))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::text_response(
            r#"{"title":"T","content":"C"}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let article = client.articles().generate("retries").await.unwrap();

    assert_eq!(article.title, "T");
}

#[tokio::test]
async fn test_overloaded_exhausts_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(common::error_body(
            503,
            "UNAVAILABLE",
            "The model is overloaded.",
        )))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(2));
    let result = client.presentations().generate("anything").await;

    assert_matches!(result, Err(Error::ServiceUnavailable(msg)) if msg == "The model is overloaded.");
}

#[tokio::test]
async fn test_rate_limit_waits_for_floor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(common::error_body(
            429,
            "RESOURCE_EXHAUSTED",
            "Quota exceeded",
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::text_response(
            r#"{"title":"After","content":"the cooldown"}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let start = Instant::now();
    let article = client.articles().generate("quotas").await.unwrap();

    assert_eq!(article.title, "After");
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_bad_request_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(common::error_body(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let result = client.articles().generate("anything").await;

    assert_matches!(
        result,
        Err(Error::BadRequest { status_text: Some(status), .. }) if status == "INVALID_ARGUMENT"
    );
}

#[tokio::test]
async fn test_empty_text_is_terminal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ARTICLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, common::fast_retry(3));
    let result = client.articles().generate("silence").await;

    assert_matches!(result, Err(Error::EmptyResponse));
}

#[tokio::test]
async fn test_blank_topic_sends_nothing() {
    let mock_server = MockServer::start().await;
    let client = common::client(&mock_server, common::fast_retry(3));

    assert_matches!(
        client.presentations().generate("   ").await,
        Err(Error::InvalidInput(_))
    );
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_models_route_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-exp:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::text_response(
            r#"{"title":"Custom","content":"model"}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = vellum::Client::builder()
        .api_key(common::test_api_key())
        .base_url(mock_server.uri())
        .models(vellum::ModelConfig {
            article: "gemini-exp".to_string(),
            ..Default::default()
        })
        .build()
        .unwrap();

    let article = client.articles().generate("routing").await.unwrap();
    assert_eq!(article.title, "Custom");
}

#[tokio::test]
async fn test_connection_refused_is_not_retried() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    // Status-like digits in the URL must not make the failure look retryable
    let client = vellum::Client::builder()
        .api_key(common::test_api_key())
        .base_url(format!("http://127.0.0.1:{}", port))
        .retry(vellum::RetryConfig {
            max_retries: 3,
            base_delay_ms: 500,
            rate_limit_floor_ms: 500,
            backoff_multiplier: 2.0,
        })
        .models(vellum::ModelConfig {
            article: "gemini-429-503".to_string(),
            ..Default::default()
        })
        .build()
        .unwrap();

    let start = Instant::now();
    let result = client.articles().generate("offline").await;

    assert_matches!(result, Err(Error::Connection(msg)) if !msg.contains("429"));
    assert!(start.elapsed() < Duration::from_millis(500));
}
