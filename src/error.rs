//! Error types for the TransRelay gateway

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the TransRelay gateway
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Client Input Errors
    // =========================================================================
    /// Required request field is missing or blank
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Text field is missing or contains only whitespace
    #[error("text is required and cannot be empty")]
    EmptyText,

    /// Source and target language are identical
    #[error("source_language and target_language cannot be the same")]
    SameLanguage { language: String },

    /// Request arrived without a body
    #[error("Request body is required")]
    MissingBody,

    /// Request body could not be parsed
    #[error("Invalid JSON in request body: {0}")]
    InvalidPayload(String),

    /// HTTP method the gateway does not serve
    #[error("Method not allowed. Use POST for translation.")]
    MethodNotAllowed { method: String },

    // =========================================================================
    // External Service Errors
    // =========================================================================
    /// Translation backend unreachable
    #[error("Translation backend connection error: {0}")]
    TranslatorConnection(#[source] reqwest::Error),

    /// Translation backend reachable but the call failed
    #[error("Translation service failed: {0}")]
    TranslationFailed(String),

    /// Audit object store write failed
    #[error("Audit store error: {0}")]
    AuditStore(String),

    // =========================================================================
    // Unexpected Errors
    // =========================================================================
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingField { .. }
            | Error::EmptyText
            | Error::SameLanguage { .. }
            | Error::MissingBody
            | Error::InvalidPayload(_) => 400,
            Error::MethodNotAllowed { .. } => 405,
            Error::TranslatorConnection(_)
            | Error::TranslationFailed(_)
            | Error::AuditStore(_)
            | Error::Io(_)
            | Error::Internal(_) => 500,
        }
    }

    /// True when the caller supplied a bad request.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// True when an external collaborator (backend, object store) failed.
    pub fn is_external_error(&self) -> bool {
        matches!(
            self,
            Error::TranslatorConnection(_) | Error::TranslationFailed(_) | Error::AuditStore(_)
        )
    }
}
