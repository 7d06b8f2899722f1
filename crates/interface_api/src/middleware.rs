//! Request audit log

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use chrono::Utc;
use tracing::{info, warn};

use crate::session::session_from_headers;

/// Records who called which route and how it ended
///
/// Rejected calls (4xx/5xx) are logged at warn so that denied landlord
/// operations stand out from normal traffic.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let route = format!("{} {}", request.method(), request.uri().path());
    let caller = match session_from_headers(request.headers()) {
        Ok(session) => session.to_string(),
        Err(_) => "malformed headers".to_string(),
    };
    let started = Utc::now();

    let response = next.run(request).await;

    let elapsed_ms = (Utc::now() - started).num_milliseconds();
    let status = response.status().as_u16();
    if response.status().is_client_error() || response.status().is_server_error() {
        warn!(%route, %caller, status, elapsed_ms, "Request rejected");
    } else {
        info!(%route, %caller, status, elapsed_ms, "Request served");
    }

    response
}
