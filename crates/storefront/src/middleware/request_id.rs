//! Request ID middleware for request tracing and correlation.
//!
//! Each request carries an id that is recorded on the request span, tagged on
//! the Sentry scope and echoed back in the `x-request-id` response header. An
//! id supplied by an upstream proxy is reused when it looks sane; otherwise a
//! UUID v4 is generated.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id accepted as-is.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Span for one request, with an empty `request_id` field filled in by
/// [`request_id_middleware`].
pub fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = tracing::field::Empty,
    )
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Upstream ids end up in logs and Sentry tags: keep them short and printable.
fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_UPSTREAM_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_proxy_style_ids() {
        assert!(is_acceptable("3f2b8c1e-0d4a-4c55-9a57-7f0e6f7d2b10"));
        assert!(is_acceptable("cf-ray:7d1e2f3a4b5c.BOM"));
    }

    #[test]
    fn test_rejects_unusable_ids() {
        assert!(!is_acceptable(""));
        assert!(!is_acceptable("has spaces"));
        assert!(!is_acceptable(&"a".repeat(MAX_UPSTREAM_ID_LEN + 1)));
    }
}
