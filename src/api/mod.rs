//! HTTP API Surface
//!
//! Method routing, CORS, and the JSON codec between the wire and the
//! handler. Transport-level failures are converted here into the error
//! taxonomy; unexpected faults leave the process as a generic message
//! carrying only the request's correlation id.
//!
//! Routes:
//!
//! - `OPTIONS` - CORS preflight
//! - `GET`     - health/version document
//! - `POST`    - translation
//! - anything else - 405

use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{RequestContext, TranslationRequest};
use crate::error::Error;
use crate::handler::TranslationHandler;
use crate::metrics;

/// API version reported by the health document.
pub const API_VERSION: &str = "1.0";

/// CORS headers attached to every response.
const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "GET,OPTIONS,POST,PUT"),
];

type ApiResponse = Response<Full<Bytes>>;

// =============================================================================
// Wire Types
// =============================================================================

/// Raw POST body before presence validation.
#[derive(Debug, Deserialize)]
struct TranslateBody {
    #[serde(default)]
    source_language: Option<String>,
    #[serde(default)]
    target_language: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<TranslateBody> for TranslationRequest {
    fn from(body: TranslateBody) -> Self {
        // Missing fields surface through validation as "<field> is
        // required" rather than as a JSON parse error.
        TranslationRequest::new(
            body.source_language.unwrap_or_default(),
            body.target_language.unwrap_or_default(),
            body.text.unwrap_or_default(),
        )
    }
}

// =============================================================================
// Routing
// =============================================================================

/// Route one HTTP exchange through the gateway.
pub async fn serve_request<B>(
    req: Request<B>,
    handler: Arc<TranslationHandler>,
) -> std::result::Result<ApiResponse, std::convert::Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let ctx = RequestContext::new();
    let method = req.method().clone();

    let response = match method {
        Method::OPTIONS => preflight(),
        Method::GET => health(&ctx),
        Method::POST => translate(req, &handler, &ctx).await,
        _ => error_response(
            &Error::MethodNotAllowed {
                method: method.to_string(),
            },
            &ctx,
        ),
    };

    metrics::REQUESTS
        .with_label_values(&[method.as_str(), response.status().as_str()])
        .inc();

    Ok(response)
}

fn preflight() -> ApiResponse {
    json_response(
        StatusCode::OK,
        &json!({"message": "CORS preflight successful"}),
    )
}

fn health(ctx: &RequestContext) -> ApiResponse {
    json_response(
        StatusCode::OK,
        &json!({
            "message": "Translation API is healthy",
            "version": API_VERSION,
            "timestamp": ctx.timestamp(),
        }),
    )
}

async fn translate<B>(
    req: Request<B>,
    handler: &TranslationHandler,
    ctx: &RequestContext,
) -> ApiResponse
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return error_response(
                &Error::Internal(format!("failed to read request body: {}", e)),
                ctx,
            );
        }
    };

    if body.is_empty() {
        return error_response(&Error::MissingBody, ctx);
    }

    let wire: TranslateBody = match serde_json::from_slice(&body) {
        Ok(wire) => wire,
        Err(e) => return error_response(&Error::InvalidPayload(e.to_string()), ctx),
    };

    match handler.handle(wire.into(), ctx).await {
        Ok(response) => json_response(StatusCode::OK, &response),
        Err(e) => error_response(&e, ctx),
    }
}

// =============================================================================
// Response Assembly
// =============================================================================

fn json_response(status: StatusCode, body: &impl Serialize) -> ApiResponse {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json");
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }

    builder.body(Full::new(Bytes::from(payload))).unwrap()
}

/// Map an error onto its status code and response body.
///
/// Client errors echo their message. Backend failures carry a `details`
/// string. Everything else is reported generically with the request id
/// only, so internals never leak past the log.
fn error_response(error: &Error, ctx: &RequestContext) -> ApiResponse {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = if error.is_client_error() {
        warn!(request_id = %ctx.request_id, "{}", error);
        json!({"error": error.to_string()})
    } else if error.is_external_error() {
        error!(request_id = %ctx.request_id, "backend failure: {}", error);
        json!({
            "error": "Translation service failed",
            "details": error.to_string(),
            "request_id": ctx.request_id.to_string(),
        })
    } else {
        error!(request_id = %ctx.request_id, "unexpected error: {}", error);
        json!({
            "error": "Internal server error",
            "request_id": ctx.request_id.to_string(),
        })
    };

    json_response(status, &body)
}

// =============================================================================
// Tests
// =============================================================================
