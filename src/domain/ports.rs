//! Domain Ports (Port/Adapter Pattern)
//!
//! This module defines the abstractions the gateway depends on.
//! Infrastructure adapters implement these traits to provide concrete
//! implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                            │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │               Ports (Traits)                         │    │
//! │  │        Translator     │     AuditStore              │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Infrastructure Layer                       │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │              Adapters (Impls)                        │    │
//! │  │  HttpTranslator │ HttpObjectStore │ LoggingAuditStore│   │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// =============================================================================
// Value Objects
// =============================================================================

/// A translation request as received from the transport layer.
///
/// Fields are kept verbatim; validation decides whether the request may
/// proceed, it never rewrites the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_language: String,
    pub target_language: String,
    pub text: String,
}

impl TranslationRequest {
    /// Create a new translation request.
    pub fn new(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            text: text.into(),
        }
    }

    /// Check the request against the input contract.
    ///
    /// All three fields must be present and non-blank, and the source and
    /// target language must differ. Violations fail fast, before any cache
    /// or backend interaction.
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(Error::MissingField {
                field: "source_language",
            });
        }
        if self.target_language.trim().is_empty() {
            return Err(Error::MissingField {
                field: "target_language",
            });
        }
        if self.text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        if self.source_language == self.target_language {
            return Err(Error::SameLanguage {
                language: self.source_language.clone(),
            });
        }
        Ok(())
    }
}

/// Per-request metadata generated at the transport boundary.
///
/// The request id doubles as the correlation identifier in logs and as
/// the key component for audit objects.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }

    /// Compact UTC timestamp used in responses and object keys.
    pub fn timestamp(&self) -> String {
        self.received_at.format("%Y%m%dT%H%M%SZ").to_string()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembled translation result returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    /// True when the result was served from the cache without invoking
    /// the translation backend.
    pub cached: bool,
    pub timestamp: String,
    pub request_id: String,
}

// =============================================================================
// Translator Port
// =============================================================================

/// Port for the external machine-translation backend.
///
/// The backend is an opaque collaborator: one call per text, no retries,
/// failures surface as [`Error::TranslationFailed`] or
/// [`Error::TranslatorConnection`].
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_language` to `target_language`.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> Result<bool>;
}

// =============================================================================
// Audit Store Port
// =============================================================================

/// Port for the write-once audit object store.
///
/// Pure side channel: objects are written, never read back, and the
/// store's availability does not gate translation.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Store `body` under `key`.
    async fn put_object(&self, key: &str, body: Bytes) -> Result<()>;
}

// =============================================================================
// Tests
// =============================================================================
