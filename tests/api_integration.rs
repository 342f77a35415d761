//! API Surface Integration Tests
//!
//! Exercises the HTTP routing layer directly: method dispatch, CORS
//! headers, JSON decoding, and the status/body mapping of the error
//! taxonomy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode};

use transrelay::api;
use transrelay::cache::TranslationCache;
use transrelay::domain::ports::Translator;
use transrelay::error::{Error, Result};
use transrelay::handler::TranslationHandler;

// =============================================================================
// Fixtures
// =============================================================================

struct FixedTranslator {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl Translator for FixedTranslator {
    async fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::TranslationFailed("backend unavailable".to_string()));
        }
        Ok(format!("übersetzt: {}", text))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

fn gateway(fail: bool) -> (Arc<TranslationHandler>, Arc<FixedTranslator>) {
    let translator = Arc::new(FixedTranslator {
        calls: AtomicUsize::new(0),
        fail,
    });
    let handler = Arc::new(TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    ));
    (handler, translator)
}

fn http_request(method: Method, body: &str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(method)
        .uri("/")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

async fn body_json(response: hyper::Response<Full<Bytes>>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Method Dispatch
// =============================================================================

#[tokio::test]
async fn options_answers_preflight() {
    let (handler, _) = gateway(false);

    let response = api::serve_request(http_request(Method::OPTIONS, ""), handler)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("Access-Control-Allow-Origin")
            .unwrap(),
        "*"
    );
    let json = body_json(response).await;
    assert_eq!(json["message"], "CORS preflight successful");
}

#[tokio::test]
async fn get_answers_health_document() {
    let (handler, _) = gateway(false);

    let response = api::serve_request(http_request(Method::GET, ""), handler)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Translation API is healthy");
    assert_eq!(json["version"], api::API_VERSION);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn unsupported_method_is_405() {
    let (handler, translator) = gateway(false);

    let response = api::serve_request(http_request(Method::PUT, "{}"), handler)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Method not allowed. Use POST for translation.");
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// POST Translation Flow
// =============================================================================

#[tokio::test]
async fn post_translates_and_reports_cache_state() {
    let (handler, translator) = gateway(false);
    let body = r#"{"source_language": "en", "target_language": "de", "text": "Hello"}"#;

    let first = api::serve_request(http_request(Method::POST, body), Arc::clone(&handler))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;
    assert_eq!(first["original_text"], "Hello");
    assert_eq!(first["translated_text"], "übersetzt: Hello");
    assert_eq!(first["cached"], false);
    assert!(first["request_id"].is_string());

    let second = api::serve_request(http_request(Method::POST, body), handler)
        .await
        .unwrap();
    let second = body_json(second).await;
    assert_eq!(second["cached"], true);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 1);

    // Each exchange gets its own request id.
    assert_ne!(first["request_id"], second["request_id"]);
}

#[tokio::test]
async fn post_without_body_is_rejected() {
    let (handler, _) = gateway(false);

    let response = api::serve_request(http_request(Method::POST, ""), handler)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Request body is required");
}

#[tokio::test]
async fn post_with_malformed_json_is_rejected() {
    let (handler, translator) = gateway(false);

    let response = api::serve_request(http_request(Method::POST, "{not json"), handler)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON in request body"));
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn post_with_missing_field_names_the_field() {
    let (handler, _) = gateway(false);

    let response = api::serve_request(
        http_request(
            Method::POST,
            r#"{"target_language": "fr", "text": "Hello"}"#,
        ),
        handler,
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "source_language is required");
}

#[tokio::test]
async fn post_with_same_languages_is_rejected() {
    let (handler, translator) = gateway(false);

    let response = api::serve_request(
        http_request(
            Method::POST,
            r#"{"source_language": "en", "target_language": "en", "text": "Hello"}"#,
        ),
        handler,
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "source_language and target_language cannot be the same"
    );
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn backend_failure_maps_to_server_error_with_details() {
    let (handler, _) = gateway(true);

    let response = api::serve_request(
        http_request(
            Method::POST,
            r#"{"source_language": "en", "target_language": "fr", "text": "Hello"}"#,
        ),
        handler,
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Translation service failed");
    assert!(json["details"]
        .as_str()
        .unwrap()
        .contains("backend unavailable"));
    assert!(json["request_id"].is_string());
}
