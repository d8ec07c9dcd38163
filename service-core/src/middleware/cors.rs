use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";
pub const ALLOWED_HEADERS: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Permissive cross-origin middleware.
///
/// Every response carries the CORS headers, error responses included. `OPTIONS`
/// requests are answered with an empty 200 and never reach the wrapped service.
///
/// `tower_http::cors::CorsLayer` refuses a wildcard origin combined with
/// credentials and only short-circuits requests that look like real preflights,
/// so the headers are written here directly.
pub async fn cors_middleware(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}
