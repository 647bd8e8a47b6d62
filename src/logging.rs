//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bodies longer than this many bytes are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Request bodies larger than this many bytes are rejected with 413 Payload Too Large.
///
/// Same as axum's default body limit.
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and
/// the full body is logged at the `debug` level.
///
/// Requests with a body larger than [MAX_REQUEST_BODY_BYTES] are answered with
/// 413 Payload Too Large without reaching the route handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body, MAX_REQUEST_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(
                "rejected request {} {}: could not read body: {error}",
                parts.method,
                parts.uri
            );
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &body_bytes,
    );

    let response = next.run(Request::from_parts(parts, Body::from(body_bytes))).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_body(&format!("Sending response: {}", parts.status), &body_bytes);

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, limit).await
}

fn log_body(summary: &str, body: &[u8]) {
    let body = String::from_utf8_lossy(body);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "{summary}\nbody: {}...",
            truncate(&body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{summary}\nbody: {body:?}");
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

#[cfg(test)]
mod logging_tests {
    use axum::{Router, http::StatusCode, middleware, routing::post};
    use axum_test::TestServer;

    use super::{MAX_REQUEST_BODY_BYTES, logging_middleware, truncate};

    async fn echo(body: String) -> String {
        body
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 64), "hello");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        // '€' is three bytes long.
        assert_eq!(truncate("a€", 2), "a");
    }

    fn echo_server() -> TestServer {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));

        TestServer::new(app)
    }

    #[tokio::test]
    async fn passes_body_through_unchanged() {
        let server = echo_server();
        let body = "x".repeat(200);

        let response = server.post("/echo").text(body.clone()).await;

        response.assert_status_ok();
        response.assert_text(body);
    }

    #[tokio::test]
    async fn accepts_body_at_limit() {
        let server = echo_server();
        let body = "x".repeat(MAX_REQUEST_BODY_BYTES);

        let response = server.post("/echo").text(body).await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn rejects_body_over_limit() {
        let server = echo_server();
        let body = "x".repeat(MAX_REQUEST_BODY_BYTES + 1);

        let response = server.post("/echo").text(body).expect_failure().await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }
}
