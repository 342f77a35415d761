//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports, following the
//! Port/Adapter (Hexagonal) architecture pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Layer                              │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │                    Ports (Traits)                           │ │
//! │  │            Translator    │    AuditStore                   │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (This Module)                       │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │ HttpTranslator │ HttpObjectStore │ LoggingAuditStore       │ │
//! │  │ InMemoryAuditStore (tests)                                 │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod http_translator;
mod object_store;

pub use http_translator::{HttpTranslator, TranslatorConfig};
pub use object_store::{
    HttpObjectStore, InMemoryAuditStore, LoggingAuditStore, ObjectStoreConfig,
};
