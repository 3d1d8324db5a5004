use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tower_http::trace::TraceLayer;
use tracing::{debug, field, Span};

use super::request_id::RequestId;

/// Wraps each request in a span tagged with its id, and records the status
/// once the response is ready.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_request(())
            .on_response(record_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn request_span(request: &Request) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .copied()
        .map(field::display);

    tracing::debug_span!(
        "http-request",
        version = ?request.version(),
        method = %request.method(),
        path = request.uri().path(),
        request_id,
        status = field::Empty,
    )
}

fn record_response(response: &Response, latency: Duration, span: &Span) {
    span.record("status", response.status().as_u16());
    debug!(?latency, "request handled");
}
