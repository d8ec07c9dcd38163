use axum::extract::Request;
use tracing::Span;

/// Header carrying the per-request correlation id.
///
/// Populated by `tower_http::request_id::SetRequestIdLayer` and echoed back by
/// `PropagateRequestIdLayer`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span factory for `tower_http::trace::TraceLayer::make_span_with`.
pub fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}

