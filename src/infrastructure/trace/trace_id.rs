use axum::{
    extract::Request,
    http::{header::CONTENT_LENGTH, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::shared::ErrorResponse;

pub const X_TRACE_ID: &str = "x-trace-id";

const MAX_TRACE_ID_LEN: usize = 128;

/// Trace id wrapper type for request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

/// Middleware that assigns a trace id to each request and stamps it into error bodies.
///
/// A well-formed `x-trace-id` request header is reused so a caller's correlation id
/// survives the hop; otherwise a fresh UUID v4 is generated. The id is echoed back in
/// the `x-trace-id` response header.
pub async fn trace_id_middleware(mut request: Request, next: Next) -> Response {
    let trace_id = request
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| is_valid_trace_id(v))
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(TraceId(trace_id.clone()));

    let span = tracing::info_span!("request", trace_id = %trace_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(error) = response.extensions_mut().remove::<ErrorResponse>() {
        response = with_error_body(response, error.with_trace_id(trace_id.clone()));
    }

    if let Ok(header_value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(X_TRACE_ID, header_value);
    }

    response
}

/// Replace the body of an error response, keeping its status and headers
fn with_error_body(response: Response, error: ErrorResponse) -> Response {
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    let body = Json(error).into_response().into_body();
    Response::from_parts(parts, body)
}

fn is_valid_trace_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_TRACE_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic())
}
