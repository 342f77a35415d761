//! TransRelay - Caching Translation Gateway
//!
//! A long-running HTTP gateway in front of a managed machine-translation
//! backend. Repeated inputs are answered from a bounded in-memory LRU
//! cache keyed by the full identity of the translation request, so the
//! backend is invoked at most once per distinct
//! (source language, target language, text) triple while the entry stays
//! cached.
//!
//! # Architecture
//!
//! ```text
//! Request ──► Validation ──► Cache lookup ──hit──► Response (cached=true)
//!                                │
//!                               miss
//!                                ▼
//!                       Translation backend ──► Cache populate
//!                                │
//!                                ▼
//!                       Response (cached=false)
//! ```
//!
//! An optional audit sink receives write-once JSON snapshots of each
//! exchange, keyed by the request id; it is a pure side channel and
//! never gates translation.
//!
//! # Modules
//!
//! - [`adapters`] - Infrastructure adapters implementing domain ports
//! - [`api`] - HTTP routing, CORS, JSON codec
//! - [`cache`] - Bounded LRU translation result cache
//! - [`domain`] - Domain layer with ports and audit records
//! - [`error`] - Error types
//! - [`handler`] - Request orchestration
//! - [`metrics`] - Prometheus metrics

pub mod adapters;
pub mod api;
pub mod cache;
pub mod domain;
pub mod error;
pub mod handler;
pub mod metrics;

// Re-export commonly used types
pub use cache::{CacheStats, TranslationCache, TranslationKey};
pub use domain::ports::{
    AuditStore, RequestContext, TranslationRequest, TranslationResponse, Translator,
};
pub use error::{Error, Result};
pub use handler::TranslationHandler;
