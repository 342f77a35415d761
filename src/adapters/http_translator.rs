//! HTTP Translation Backend Adapter
//!
//! Implements the `Translator` port against a REST machine-translation
//! backend. One POST per translation, timeout enforced by the client,
//! no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::ports::Translator;
use crate::error::{Error, Result};

/// Configuration for the HTTP translation backend.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Endpoint receiving translation requests
    pub endpoint: String,

    /// Endpoint answering liveness probes
    pub health_endpoint: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://translate.backend.svc.cluster.local:8100/translate".to_string(),
            health_endpoint: "http://translate.backend.svc.cluster.local:8100/healthz"
                .to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct BackendRequest<'a> {
    text: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[derive(Debug, Deserialize)]
struct BackendResponse {
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// =============================================================================
// Adapter
// =============================================================================

/// Translator adapter speaking JSON over HTTP to the backend.
pub struct HttpTranslator {
    config: TranslatorConfig,
    client: reqwest::Client,
}

impl HttpTranslator {
    /// Create a new HTTP translator.
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Backend endpoint in use.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl std::fmt::Debug for HttpTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranslator")
            .field("endpoint", &self.config.endpoint)
            .field("request_timeout", &self.config.request_timeout)
            .finish()
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    #[instrument(skip(self, text), fields(source = %source_language, target = %target_language))]
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&BackendRequest {
                text,
                source_language,
                target_language,
            })
            .send()
            .await
            .map_err(Error::TranslatorConnection)?;

        if !response.status().is_success() {
            return Err(Error::TranslationFailed(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let body: BackendResponse = response
            .json()
            .await
            .map_err(|e| Error::TranslationFailed(format!("unparsable backend response: {}", e)))?;

        match body.translated_text {
            Some(translated) => {
                debug!(chars = translated.chars().count(), "backend returned translation");
                Ok(translated)
            }
            None => Err(Error::TranslationFailed(
                body.error
                    .unwrap_or_else(|| "backend returned no result".to_string()),
            )),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(&self.config.health_endpoint)
            .send()
            .await
            .map_err(Error::TranslatorConnection)?;

        Ok(response.status().is_success())
    }
}

// =============================================================================
// Tests
// =============================================================================
