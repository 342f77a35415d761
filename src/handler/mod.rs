//! Translation Request Handler - "The Brain"
//!
//! Orchestrates one translation request: validation → cache lookup →
//! backend fallback → cache populate → response assembly, with an
//! optional audit trail on the side.
//!
//! Side-effect contract: exactly one backend invocation per cache miss,
//! exactly one cache mutation per successful miss, zero cache mutations
//! on hits and on failures.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, instrument, warn};

use crate::cache::{TranslationCache, TranslationKey};
use crate::domain::audit::AuditRecord;
use crate::domain::ports::{
    AuditStore, RequestContext, TranslationRequest, TranslationResponse, Translator,
};
use crate::error::Result;
use crate::metrics;

/// Request orchestrator holding the process-wide cache and the ports to
/// the external collaborators.
pub struct TranslationHandler {
    cache: Arc<TranslationCache>,
    translator: Arc<dyn Translator>,
    audit: Option<Arc<dyn AuditStore>>,
}

impl TranslationHandler {
    /// Create a handler without an audit sink.
    pub fn new(cache: Arc<TranslationCache>, translator: Arc<dyn Translator>) -> Self {
        Self {
            cache,
            translator,
            audit: None,
        }
    }

    /// Attach an audit sink.
    pub fn with_audit(mut self, audit: Arc<dyn AuditStore>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// The cache this handler consults.
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Handle one translation request.
    ///
    /// Validation failures and backend failures return early; neither
    /// path mutates the cache.
    #[instrument(skip(self, request), fields(request_id = %ctx.request_id))]
    pub async fn handle(
        &self,
        request: TranslationRequest,
        ctx: &RequestContext,
    ) -> Result<TranslationResponse> {
        request.validate()?;

        let key = TranslationKey::new(
            &request.source_language,
            &request.target_language,
            &request.text,
        );

        let (translated_text, cached) = match self.cache.get(&key) {
            Some(hit) => {
                debug!(key = %key, "cache hit");
                metrics::CACHE_HITS.inc();
                (hit, true)
            }
            None => {
                debug!(key = %key, "cache miss");
                metrics::CACHE_MISSES.inc();

                // The backend call runs outside the cache lock, so
                // unrelated concurrent misses are not serialized.
                let timer = metrics::TRANSLATE_DURATION.start_timer();
                let result = self
                    .translator
                    .translate(
                        &request.text,
                        &request.source_language,
                        &request.target_language,
                    )
                    .await;
                timer.observe_duration();

                let translated = match result {
                    Ok(translated) => translated,
                    Err(e) => {
                        metrics::TRANSLATE_FAILURES.inc();
                        return Err(e);
                    }
                };

                self.cache.put(key, translated.clone());
                (translated, false)
            }
        };

        metrics::CACHE_ENTRIES.set(self.cache.len() as i64);
        metrics::CACHE_EVICTIONS.set(self.cache.evictions() as i64);

        let response = TranslationResponse {
            original_text: request.text.clone(),
            translated_text,
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            cached,
            timestamp: ctx.timestamp(),
            request_id: ctx.request_id.to_string(),
        };

        self.write_audit(request, &response, ctx).await;

        info!(cached, "translation served");
        Ok(response)
    }

    /// Best-effort audit write of the raw exchange.
    ///
    /// Failures are logged and counted, never propagated: the audit
    /// trail is a side channel and must not gate translation.
    async fn write_audit(
        &self,
        request: TranslationRequest,
        response: &TranslationResponse,
        ctx: &RequestContext,
    ) {
        let Some(store) = &self.audit else {
            return;
        };

        let request_record = AuditRecord::request_received(ctx, request);
        let response_record = AuditRecord::response_sent(ctx, response.clone());

        let (request_body, response_body) = match (
            serde_json::to_vec(&request_record),
            serde_json::to_vec(&response_record),
        ) {
            (Ok(req), Ok(resp)) => (Bytes::from(req), Bytes::from(resp)),
            _ => {
                metrics::AUDIT_FAILURES.inc();
                warn!(request_id = %ctx.request_id, "audit record serialization failed");
                return;
            }
        };

        let (request_result, response_result) = futures::future::join(
            store.put_object(&request_record.object_key(), request_body),
            store.put_object(&response_record.object_key(), response_body),
        )
        .await;

        for (side, result) in [("request", request_result), ("response", response_result)] {
            if let Err(e) = result {
                metrics::AUDIT_FAILURES.inc();
                warn!(request_id = %ctx.request_id, record = side, error = %e, "audit write failed");
            }
        }
    }
}

impl std::fmt::Debug for TranslationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationHandler")
            .field("cache", &self.cache)
            .field("audit_enabled", &self.audit.is_some())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
