//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, health probes,
//! route classification and access logging.

use crate::config::AppState;
use crate::handler::payload::ErrorPayload;
use crate::handler::routes::{self, Route};
use crate::handler::scripture;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub server_name: &'a str,
}

impl RequestContext<'_> {
    /// Serialize `value` into a JSON response
    pub fn json<T: Serialize>(&self, status: StatusCode, value: &T) -> Response<Full<Bytes>> {
        http::json_response(status, value, self.server_name, self.is_head)
    }

    /// Send already-encoded JSON unchanged
    pub fn raw_json(&self, status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
        http::build_json_response(status, body, self.server_name, self.is_head)
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let response = match check_http_method(method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: uri.path(),
                is_head: *method == Method::HEAD,
                server_name: &state.config.http.server_name,
            };
            dispatch(&ctx, &state).await
        }
    };

    if state.cached_access_log.load(Ordering::Relaxed) {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = AccessLogEntry::version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
}

/// Route a GET/HEAD request by path
pub async fn dispatch(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // Health check endpoints take priority over book names
    let health = &state.config.health;
    if health.enabled {
        if ctx.path == health.liveness_path {
            return ctx.json(StatusCode::OK, &HealthStatus { status: "ok" });
        }
        if ctx.path == health.readiness_path {
            return if state.corpus.is_ready().await {
                ctx.json(StatusCode::OK, &HealthStatus { status: "ok" })
            } else {
                ctx.json(
                    StatusCode::SERVICE_UNAVAILABLE,
                    &HealthStatus {
                        status: "unavailable",
                    },
                )
            };
        }
    }

    match Route::parse(ctx.path) {
        Some(route) => scripture::respond(ctx, &state.corpus, &route).await,
        None => {
            let message = routes::invalid_url_message();
            ctx.json(StatusCode::BAD_REQUEST, &ErrorPayload { error: &message })
        }
    }
}
