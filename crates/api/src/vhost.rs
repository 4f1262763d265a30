//! Host-based dispatch between the API and the static frontend.
//!
//! One listener serves both sites. The `Host` header (port stripped) picks
//! the API router, the frontend file server, or neither. Unknown hosts get
//! a `200` on `GET /` so load-balancer probes pass, and a plain-text `404`
//! otherwise.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// The two sites served by this process, keyed by host name.
#[derive(Clone)]
pub struct VirtualHosts {
    api_domain: Arc<str>,
    frontend_domain: Arc<str>,
    api: Router,
    frontend: Router,
}

impl VirtualHosts {
    pub fn new(api_domain: &str, frontend_domain: &str, api: Router, frontend: Router) -> Self {
        Self {
            api_domain: Arc::from(api_domain.to_ascii_lowercase()),
            frontend_domain: Arc::from(frontend_domain.to_ascii_lowercase()),
            api,
            frontend,
        }
    }
}

/// Static file router for the built frontend.
///
/// Paths that match no file fall back to `index.html` so client-side
/// routes survive a reload.
pub fn frontend_router(root: &Path) -> Router {
    let index = ServeFile::new(root.join("index.html"));
    Router::new().fallback_service(ServeDir::new(root).fallback(index))
}

/// Fallback handler routing every request by its host.
pub async fn dispatch(State(hosts): State<VirtualHosts>, request: Request) -> Response {
    let host = request_host(&request).unwrap_or_default();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    if host == *hosts.api_domain {
        tracing::debug!(%method, %path, %host, "API request");
        forward(hosts.api, request).await
    } else if host == *hosts.frontend_domain {
        tracing::debug!(%method, %path, %host, "Frontend request");
        forward(hosts.frontend, request).await
    } else {
        tracing::warn!(%method, %path, %host, "Unhandled request");
        unconfigured(&method, &path, &host)
    }
}

async fn forward(router: Router, request: Request) -> Response {
    match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

fn unconfigured(method: &Method, path: &str, host: &str) -> Response {
    if method == Method::GET && path == "/" {
        return (StatusCode::OK, "OK").into_response();
    }
    (
        StatusCode::NOT_FOUND,
        format!("Hostname \"{host}\" not configured."),
    )
        .into_response()
}

/// Lower-cased host of a request without its port.
///
/// Reads the `Host` header, falling back to the URI authority (HTTP/2).
pub fn request_host(request: &Request) -> Option<String> {
    let raw = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().host())?;
    Some(strip_port(raw.trim()).to_ascii_lowercase())
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal: keep the brackets, drop what follows.
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
