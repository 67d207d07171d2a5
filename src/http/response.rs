//! HTTP response building module
//!
//! Every response carries `Access-Control-Allow-Origin: *`; the API is public and read-only.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

const JSON_CONTENT_TYPE: &str = "application/json";
const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build a JSON response from an already-encoded body
///
/// HEAD requests keep the `Content-Length` of the full body but send no bytes.
pub fn build_json_response(
    status: StatusCode,
    body: Bytes,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Serialize `value` and build a JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(json) => build_json_response(status, Bytes::from(json), server_name, is_head),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
                server_name,
                is_head,
            )
        }
    }
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Allow", ALLOWED_METHODS)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from_static(
            br#"{"error":"Method not allowed"}"#,
        )))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_json_response_headers() {
        let resp = json_response(
            StatusCode::NOT_FOUND,
            &serde_json::json!({ "error": "Book not found" }),
            "bible-api/test",
            false,
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let headers = resp.headers();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(headers["Server"], "bible-api/test");
        assert_eq!(body_bytes(resp).await, r#"{"error":"Book not found"}"#);
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_json_response(
            StatusCode::OK,
            Bytes::from_static(b"[1,2,3]"),
            "bible-api/test",
            true,
        );
        assert_eq!(resp.headers()["Content-Length"], "7");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn test_preflight_and_405() {
        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["Access-Control-Allow-Methods"], ALLOWED_METHODS);

        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], ALLOWED_METHODS);
    }
}
