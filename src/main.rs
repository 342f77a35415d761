//! TransRelay - Caching Translation Gateway
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         TransRelay                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐       │
//! │  │   HTTP API   │───▶│   Handler    │───▶│  Translation │       │
//! │  │  (routing,   │    │ (validation, │    │   backend    │       │
//! │  │   CORS)      │    │  LRU cache)  │    │  (HTTP)      │       │
//! │  └──────────────┘    └──────┬───────┘    └──────────────┘       │
//! │                             │ side channel                       │
//! │                             ▼                                    │
//! │                      ┌──────────────┐                            │
//! │                      │ Audit bucket │                            │
//! │                      └──────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use transrelay::adapters::{
    HttpObjectStore, HttpTranslator, LoggingAuditStore, ObjectStoreConfig, TranslatorConfig,
};
use transrelay::api;
use transrelay::cache::{TranslationCache, DEFAULT_CACHE_CAPACITY};
use transrelay::domain::ports::{AuditStore, Translator};
use transrelay::error::{Error, Result};
use transrelay::handler::TranslationHandler;
use transrelay::metrics;

// =============================================================================
// CLI Arguments
// =============================================================================

/// TransRelay - caching gateway in front of a machine-translation backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// API server bind address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen_addr: String,

    /// Metrics server bind address
    #[arg(long, env = "METRICS_ADDR", default_value = "0.0.0.0:9090")]
    metrics_addr: String,

    /// Translation backend endpoint
    #[arg(
        long,
        env = "TRANSLATE_ENDPOINT",
        default_value = "http://translate.backend.svc.cluster.local:8100/translate"
    )]
    translate_endpoint: String,

    /// Translation backend health endpoint
    #[arg(
        long,
        env = "TRANSLATE_HEALTH_ENDPOINT",
        default_value = "http://translate.backend.svc.cluster.local:8100/healthz"
    )]
    translate_health_endpoint: String,

    /// Translation request timeout in seconds
    #[arg(long, env = "TRANSLATE_TIMEOUT_SECONDS", default_value = "10")]
    translate_timeout_seconds: u64,

    /// Maximum number of cached translations (0 disables caching)
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Audit bucket base URL (e.g. http://minio:9000/translation-audit);
    /// omit to disable the object-store audit trail
    #[arg(long, env = "AUDIT_BUCKET_URL")]
    audit_bucket_url: Option<String>,

    /// Write audit records to the log instead of an object store
    #[arg(long, env = "AUDIT_LOG_ONLY")]
    audit_log_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);
    metrics::init();

    info!("Starting TransRelay");
    info!("  Translation backend: {}", args.translate_endpoint);
    info!("  Cache capacity: {}", args.cache_capacity);
    info!(
        "  Audit: {}",
        match (&args.audit_bucket_url, args.audit_log_only) {
            (Some(url), _) => format!("object store ({})", url),
            (None, true) => "log only".to_string(),
            (None, false) => "disabled".to_string(),
        }
    );

    // Translation backend port
    let translator_config = TranslatorConfig {
        endpoint: args.translate_endpoint.clone(),
        health_endpoint: args.translate_health_endpoint.clone(),
        request_timeout: Duration::from_secs(args.translate_timeout_seconds),
    };
    let translator = Arc::new(HttpTranslator::new(translator_config)?);

    // Advisory probe: a cold backend should not keep the gateway down.
    match translator.health_check().await {
        Ok(true) => info!("Translation backend healthy"),
        Ok(false) => error!("Translation backend health probe not OK - continuing anyway"),
        Err(e) => {
            error!("Translation backend health check failed: {}", e);
            error!("Continuing anyway - translations may fail until the backend is reachable");
        }
    }

    // Process-wide result cache; shared by every connection.
    let cache = Arc::new(TranslationCache::new(args.cache_capacity));

    // Optional audit sink
    let audit: Option<Arc<dyn AuditStore>> = if let Some(bucket_url) = &args.audit_bucket_url {
        let store = HttpObjectStore::new(ObjectStoreConfig {
            bucket_url: bucket_url.clone(),
            request_timeout: Duration::from_secs(5),
        })?;
        Some(Arc::new(store))
    } else if args.audit_log_only {
        Some(Arc::new(LoggingAuditStore::new()))
    } else {
        None
    };

    let mut handler = TranslationHandler::new(cache, translator);
    if let Some(audit) = audit {
        handler = handler.with_audit(audit);
    }
    let handler = Arc::new(handler);

    // Start metrics server
    let metrics_addr = args.metrics_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = run_metrics_server(&metrics_addr).await {
            error!("Metrics server error: {}", e);
        }
    });

    // Run the API server
    run_api_server(&args.listen_addr, handler).await?;

    info!("Gateway shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

// =============================================================================
// API Server
// =============================================================================

async fn run_api_server(addr: &str, handler: Arc<TranslationHandler>) -> Result<()> {
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper_util::rt::TokioIo;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Internal(format!("Invalid API server address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind API server: {}", e)))?;

    info!("API server listening on {}", addr);

    loop {
        let (stream, _) = listener
            .accept()
            .await
            .map_err(|e| Error::Internal(format!("API server accept error: {}", e)))?;

        let io = TokioIo::new(stream);
        let handler = Arc::clone(&handler);

        tokio::spawn(async move {
            if let Err(e) = http1::Builder::new()
                .serve_connection(
                    io,
                    service_fn(move |req| api::serve_request(req, Arc::clone(&handler))),
                )
                .await
            {
                tracing::error!("API server connection error: {}", e);
            }
        });
    }
}

// =============================================================================
// Metrics Server
// =============================================================================

async fn run_metrics_server(addr: &str) -> Result<()> {
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::{Request, Response, StatusCode};
    use hyper_util::rt::TokioIo;
    use prometheus::{Encoder, TextEncoder};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    async fn metrics_handler(
        req: Request<hyper::body::Incoming>,
    ) -> std::result::Result<Response<Full<Bytes>>, std::convert::Infallible> {
        let response = match req.uri().path() {
            "/metrics" => {
                let encoder = TextEncoder::new();
                let metric_families = prometheus::gather();
                let mut buffer = Vec::new();
                encoder.encode(&metric_families, &mut buffer).unwrap();

                Response::builder()
                    .status(StatusCode::OK)
                    .header("Content-Type", encoder.format_type())
                    .body(Full::new(Bytes::from(buffer)))
                    .unwrap()
            }
            "/healthz" | "/livez" => Response::builder()
                .status(StatusCode::OK)
                .body(Full::new(Bytes::from("ok")))
                .unwrap(),
            _ => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Full::new(Bytes::from("not found")))
                .unwrap(),
        };
        Ok(response)
    }

    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Internal(format!("Invalid metrics server address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind metrics server: {}", e)))?;

    info!("Metrics server listening on {}", addr);

    loop {
        let (stream, _) = listener
            .accept()
            .await
            .map_err(|e| Error::Internal(format!("Metrics server accept error: {}", e)))?;

        let io = TokioIo::new(stream);

        tokio::spawn(async move {
            if let Err(e) = http1::Builder::new()
                .serve_connection(io, service_fn(metrics_handler))
                .await
            {
                tracing::error!("Metrics server connection error: {}", e);
            }
        });
    }
}
