//! Gateway Integration Tests
//!
//! Drives the translation handler end to end with a scripted backend:
//! cache hit/miss flow, validation short-circuits, backend failure
//! isolation, and the audit trail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;

use transrelay::adapters::InMemoryAuditStore;
use transrelay::cache::TranslationCache;
use transrelay::domain::ports::{AuditStore, RequestContext, TranslationRequest, Translator};
use transrelay::error::{Error, Result};
use transrelay::handler::TranslationHandler;

// =============================================================================
// Scripted Backend
// =============================================================================

/// Backend double: counts invocations, optionally fails every call.
struct ScriptedTranslator {
    calls: AtomicUsize,
    fail: bool,
}

impl ScriptedTranslator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::TranslationFailed("backend unavailable".to_string()));
        }
        Ok(format!("[{}->{}] {}", source_language, target_language, text))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail)
    }
}

fn request(source: &str, target: &str, text: &str) -> TranslationRequest {
    TranslationRequest::new(source, target, text)
}

// =============================================================================
// Validation Short-Circuits
// =============================================================================

#[tokio::test]
async fn same_language_is_rejected_before_the_backend() {
    let translator = ScriptedTranslator::new();
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    );

    let result = handler
        .handle(request("en", "en", "Hello"), &RequestContext::new())
        .await;

    assert_matches!(result, Err(Error::SameLanguage { .. }));
    assert!(result.unwrap_err().is_client_error());
    assert_eq!(translator.calls(), 0);
    assert_eq!(handler.cache().len(), 0);
}

#[tokio::test]
async fn blank_fields_are_rejected_before_the_backend() {
    let translator = ScriptedTranslator::new();
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    );

    for bad in [
        request("", "fr", "Hello"),
        request("en", "  ", "Hello"),
        request("en", "fr", "   "),
    ] {
        let result = handler.handle(bad, &RequestContext::new()).await;
        assert!(result.unwrap_err().is_client_error());
    }

    assert_eq!(translator.calls(), 0);
    assert_eq!(handler.cache().len(), 0);
}

// =============================================================================
// Cache Flow
// =============================================================================

#[tokio::test]
async fn repeat_request_is_served_from_cache() {
    let translator = ScriptedTranslator::new();
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    );

    let first = handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    assert!(!first.cached);
    assert_eq!(first.translated_text, "[en->fr] Hello");
    assert_eq!(translator.calls(), 1);

    let second = handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    assert!(second.cached);
    assert_eq!(second.translated_text, first.translated_text);
    assert_eq!(translator.calls(), 1);

    assert_eq!(handler.cache().hits(), 1);
    assert_eq!(handler.cache().misses(), 1);
}

#[tokio::test]
async fn requests_differing_in_any_field_miss_independently() {
    let translator = ScriptedTranslator::new();
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    );

    handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    handler
        .handle(request("en", "de", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    handler
        .handle(request("en", "fr", "Hello!"), &RequestContext::new())
        .await
        .unwrap();

    assert_eq!(translator.calls(), 3);
    assert_eq!(handler.cache().len(), 3);
}

#[tokio::test]
async fn recently_read_entry_survives_eviction() {
    // Capacity 2: put A, put B, read A, put C. B is the eviction victim.
    let translator = ScriptedTranslator::new();
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(2)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    );

    handler
        .handle(request("en", "fr", "A"), &RequestContext::new())
        .await
        .unwrap();
    handler
        .handle(request("en", "fr", "B"), &RequestContext::new())
        .await
        .unwrap();

    // Re-read A: promoted to most recently used.
    let hit = handler
        .handle(request("en", "fr", "A"), &RequestContext::new())
        .await
        .unwrap();
    assert!(hit.cached);

    handler
        .handle(request("en", "fr", "C"), &RequestContext::new())
        .await
        .unwrap();
    assert_eq!(translator.calls(), 3);

    // A stays hot, B is gone and would need the backend again.
    let a_again = handler
        .handle(request("en", "fr", "A"), &RequestContext::new())
        .await
        .unwrap();
    assert!(a_again.cached);
    assert_eq!(translator.calls(), 3);

    let b_again = handler
        .handle(request("en", "fr", "B"), &RequestContext::new())
        .await
        .unwrap();
    assert!(!b_again.cached);
    assert_eq!(translator.calls(), 4);
}

// =============================================================================
// Backend Failure Isolation
// =============================================================================

#[tokio::test]
async fn backend_failure_leaves_the_cache_unchanged() {
    let good = ScriptedTranslator::new();
    let cache = Arc::new(TranslationCache::new(8));
    let handler =
        TranslationHandler::new(Arc::clone(&cache), Arc::clone(&good) as Arc<dyn Translator>);

    handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    let size_before = cache.len();

    // Same cache, failing backend.
    let bad = ScriptedTranslator::failing();
    let handler =
        TranslationHandler::new(Arc::clone(&cache), Arc::clone(&bad) as Arc<dyn Translator>);

    let result = handler
        .handle(request("en", "de", "Hello"), &RequestContext::new())
        .await;

    let err = result.unwrap_err();
    assert!(err.is_external_error());
    assert!(!err.is_client_error());
    assert_eq!(bad.calls(), 1);
    assert_eq!(cache.len(), size_before);

    // The previously cached entry still answers without a backend call.
    let cached = handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    assert!(cached.cached);
    assert_eq!(bad.calls(), 1);
}

// =============================================================================
// Response Metadata
// =============================================================================

#[tokio::test]
async fn response_carries_request_metadata() {
    let translator = ScriptedTranslator::new();
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    );
    let ctx = RequestContext::new();

    let response = handler
        .handle(request("en", "fr", "Hello"), &ctx)
        .await
        .unwrap();

    assert_eq!(response.original_text, "Hello");
    assert_eq!(response.source_language, "en");
    assert_eq!(response.target_language, "fr");
    assert_eq!(response.request_id, ctx.request_id.to_string());
    assert_eq!(response.timestamp, ctx.timestamp());
}

// =============================================================================
// Audit Trail
// =============================================================================

#[tokio::test]
async fn successful_exchange_writes_request_and_response_records() {
    let translator = ScriptedTranslator::new();
    let audit = Arc::new(InMemoryAuditStore::new());
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    )
    .with_audit(Arc::clone(&audit) as Arc<dyn AuditStore>);

    let ctx = RequestContext::new();
    handler
        .handle(request("en", "fr", "Hello"), &ctx)
        .await
        .unwrap();

    assert_eq!(audit.len(), 2);
    assert_eq!(audit.keys_with_prefix("requests/").len(), 1);
    assert_eq!(audit.keys_with_prefix("responses/").len(), 1);

    // Both objects are JSON and carry the correlating request id.
    for (key, body) in audit.objects() {
        assert!(key.contains(&ctx.request_id.to_string()));
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["request_id"], ctx.request_id.to_string());
    }
}

#[tokio::test]
async fn cache_hits_are_audited_too() {
    let translator = ScriptedTranslator::new();
    let audit = Arc::new(InMemoryAuditStore::new());
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    )
    .with_audit(Arc::clone(&audit) as Arc<dyn AuditStore>);

    handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();
    handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await
        .unwrap();

    // Two exchanges, four objects, one backend call.
    assert_eq!(audit.len(), 4);
    assert_eq!(translator.calls(), 1);
}

#[tokio::test]
async fn failed_translation_writes_no_audit_records() {
    let translator = ScriptedTranslator::failing();
    let audit = Arc::new(InMemoryAuditStore::new());
    let handler = TranslationHandler::new(
        Arc::new(TranslationCache::new(8)),
        Arc::clone(&translator) as Arc<dyn Translator>,
    )
    .with_audit(Arc::clone(&audit) as Arc<dyn AuditStore>);

    let result = handler
        .handle(request("en", "fr", "Hello"), &RequestContext::new())
        .await;

    assert!(result.is_err());
    assert!(audit.is_empty());
}
