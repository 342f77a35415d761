//! Audit Records
//!
//! Immutable snapshots of a translation exchange, written to the audit
//! sink as write-once JSON objects keyed by the request identifier. They
//! are never read back by the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ports::{RequestContext, TranslationRequest, TranslationResponse};

/// One side of a translation exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuditRecord {
    /// Raw request as received, before any processing.
    RequestReceived {
        request_id: String,
        received_at: DateTime<Utc>,
        request: TranslationRequest,
    },

    /// Raw response as returned to the caller.
    ResponseSent {
        request_id: String,
        sent_at: DateTime<Utc>,
        response: TranslationResponse,
    },
}

impl AuditRecord {
    /// Snapshot an incoming request.
    pub fn request_received(ctx: &RequestContext, request: TranslationRequest) -> Self {
        Self::RequestReceived {
            request_id: ctx.request_id.to_string(),
            received_at: ctx.received_at,
            request,
        }
    }

    /// Snapshot an outgoing response.
    pub fn response_sent(ctx: &RequestContext, response: TranslationResponse) -> Self {
        Self::ResponseSent {
            request_id: ctx.request_id.to_string(),
            sent_at: Utc::now(),
            response,
        }
    }

    /// Record type name, as serialized in the `type` tag.
    pub fn record_type(&self) -> &'static str {
        match self {
            AuditRecord::RequestReceived { .. } => "RequestReceived",
            AuditRecord::ResponseSent { .. } => "ResponseSent",
        }
    }

    /// Request id this record belongs to.
    pub fn request_id(&self) -> &str {
        match self {
            AuditRecord::RequestReceived { request_id, .. } => request_id,
            AuditRecord::ResponseSent { request_id, .. } => request_id,
        }
    }

    /// Object key this record is stored under.
    pub fn object_key(&self) -> String {
        match self {
            AuditRecord::RequestReceived {
                request_id,
                received_at,
                ..
            } => format!(
                "requests/{}-{}.json",
                received_at.format("%Y%m%dT%H%M%SZ"),
                request_id
            ),
            AuditRecord::ResponseSent {
                request_id,
                sent_at,
                ..
            } => format!(
                "responses/{}-{}.json",
                sent_at.format("%Y%m%dT%H%M%SZ"),
                request_id
            ),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> TranslationRequest {
        TranslationRequest::new("en", "fr", "Hello")
    }

    #[test]
    fn test_request_record_carries_context() {
        let ctx = RequestContext::new();
        let record = AuditRecord::request_received(&ctx, sample_request());

        assert_eq!(record.record_type(), "RequestReceived");
        assert_eq!(record.request_id(), ctx.request_id.to_string());
    }

    #[test]
    fn test_object_keys_are_partitioned_by_side() {
        let ctx = RequestContext::new();
        let request_record = AuditRecord::request_received(&ctx, sample_request());

        let response = TranslationResponse {
            original_text: "Hello".to_string(),
            translated_text: "Bonjour".to_string(),
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            cached: false,
            timestamp: ctx.timestamp(),
            request_id: ctx.request_id.to_string(),
        };
        let response_record = AuditRecord::response_sent(&ctx, response);

        assert!(request_record.object_key().starts_with("requests/"));
        assert!(response_record.object_key().starts_with("responses/"));
        assert!(request_record
            .object_key()
            .contains(&ctx.request_id.to_string()));
    }

    #[test]
    fn test_serialization_is_tagged() {
        let ctx = RequestContext::new();
        let record = AuditRecord::request_received(&ctx, sample_request());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "RequestReceived");
        assert_eq!(json["request"]["text"], "Hello");

        let back: AuditRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.record_type(), "RequestReceived");
    }
}
