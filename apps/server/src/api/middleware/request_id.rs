//! Request ID middleware with trace context in response headers

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use opentelemetry::trace::TraceContextExt;
use std::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::request_context::RequestContext;

/// Opens the `http_request` span for every request.
///
/// The server always assigns its own `x-request-id`; a different id sent by
/// the client is echoed back as `x-correlation-id`. `x-trace-id` is only sent
/// when the span carries a valid OpenTelemetry trace id.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        otel.kind = "server",
        http.response.status_code = tracing::field::Empty,
        directory.entity = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let request_id = Uuid::new_v4().to_string();
    span.record("request_id", request_id.as_str());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    if let Some(entity) = crate::metrics::extract_entity(&path) {
        span.record("directory.entity", entity);
    }

    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });

    let mut response = next.run(req).await;
    let status = response.status();
    span.record("http.response.status_code", status.as_u16());

    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    let span_context = span.context().span().span_context().clone();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert("x-request-id", value);
    }
    if span_context.is_valid() {
        if let Ok(value) = HeaderValue::from_str(&span_context.trace_id().to_string()) {
            headers.insert("x-trace-id", value);
        }
    }
    if let Some(client_id) = client_id.filter(|id| *id != request_id) {
        if let Ok(value) = HeaderValue::from_str(&client_id) {
            headers.insert("x-correlation-id", value);
        }
    }

    response
}
