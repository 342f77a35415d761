//! Audit Store Adapters
//!
//! Implementations of the `AuditStore` port: an S3-compatible HTTP
//! object store for production, a tracing-backed sink for development,
//! and an in-memory collector for tests.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::ports::AuditStore;
use crate::error::{Error, Result};

/// Configuration for the S3-compatible audit bucket.
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    /// Base URL of the bucket, e.g. `http://minio.audit.svc:9000/translation-audit`
    pub bucket_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            bucket_url: "http://minio.audit.svc.cluster.local:9000/translation-audit"
                .to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

// =============================================================================
// HTTP Object Store
// =============================================================================

/// Audit store writing objects with plain HTTP PUTs, S3-compatible.
pub struct HttpObjectStore {
    config: ObjectStoreConfig,
    client: reqwest::Client,
}

impl HttpObjectStore {
    /// Create a new object store adapter.
    pub fn new(config: ObjectStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Full object URL for a key. Path segments are percent-encoded,
    /// slashes between them are preserved.
    fn object_url(&self, key: &str) -> String {
        let encoded = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}",
            self.config.bucket_url.trim_end_matches('/'),
            encoded
        )
    }
}

impl std::fmt::Debug for HttpObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpObjectStore")
            .field("bucket_url", &self.config.bucket_url)
            .finish()
    }
}

#[async_trait]
impl AuditStore for HttpObjectStore {
    async fn put_object(&self, key: &str, body: Bytes) -> Result<()> {
        let url = self.object_url(key);

        let response = self
            .client
            .put(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::AuditStore(format!("PUT {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::AuditStore(format!(
                "PUT {} returned {}",
                url,
                response.status()
            )));
        }

        debug!(key = %key, "audit object stored");
        Ok(())
    }
}

// =============================================================================
// Logging Audit Store
// =============================================================================

/// Audit store that writes records to the tracing output.
///
/// Useful for development and for deployments without an audit bucket.
#[derive(Debug, Clone, Default)]
pub struct LoggingAuditStore;

impl LoggingAuditStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditStore for LoggingAuditStore {
    async fn put_object(&self, key: &str, body: Bytes) -> Result<()> {
        info!(key = %key, record = %String::from_utf8_lossy(&body), "Audit record");
        Ok(())
    }
}

// =============================================================================
// In-Memory Audit Store
// =============================================================================

/// In-memory audit collector for tests.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    objects: RwLock<Vec<(String, Bytes)>>,
}

impl InMemoryAuditStore {
    /// Create a new in-memory audit store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored objects, in write order.
    pub fn objects(&self) -> Vec<(String, Bytes)> {
        self.objects.read().clone()
    }

    /// Keys of stored objects starting with `prefix`.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.objects
            .read()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Check if no objects were stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Drop all stored objects.
    pub fn clear(&self) {
        self.objects.write().clear();
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn put_object(&self, key: &str, body: Bytes) -> Result<()> {
        self.objects.write().push((key.to_string(), body));
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
