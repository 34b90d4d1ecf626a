//! HTTP request metrics
//!
//! Runs as a `Router::layer`, so `MatchedPath` is set for routed requests and
//! the `path` label is always a route template.

use crate::metrics::{
    route_label, InFlightGuard, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL,
    HTTP_REQUEST_DURATION_SECONDS, HTTP_RESPONSE_SIZE_BYTES,
};
use axum::{
    extract::{MatchedPath, Request},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let matched = req.extensions().get::<MatchedPath>();
    let path = route_label(matched.map(MatchedPath::as_str)).to_string();

    let _in_flight =
        InFlightGuard::new(HTTP_REQUESTS_IN_FLIGHT.with_label_values(&[&method, &path]));

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(start.elapsed().as_secs_f64());

    if let Some(size) = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
    {
        HTTP_RESPONSE_SIZE_BYTES
            .with_label_values(&[&method, &path, &status])
            .observe(size);
    }

    response
}
