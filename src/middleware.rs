use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts, Request},
    http::{request::Parts, Extensions, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::info;
use uuid::Uuid;

/// Logging middleware for request/response tracking
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client_ip = get_client_ip(request.headers(), request.extensions())
        .unwrap_or_else(|| "unknown".to_string());
    let request_id = Uuid::new_v4();

    info!(
        target: "quoter::middleware",
        %request_id,
        method = %method,
        uri = %uri,
        client_ip = %client_ip,
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status();
    info!(
        target: "quoter::middleware",
        %request_id,
        method = %method,
        uri = %uri,
        status = %status,
        "Request completed"
    );

    response
}

/// Client address used as the rate limit key; `None` when it cannot be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub Option<String>);

impl ClientAddress {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientAddress(get_client_ip(&parts.headers, &parts.extensions)))
    }
}

pub fn get_client_ip(headers: &HeaderMap, extensions: &Extensions) -> Option<String> {
    // Try to get real IP from headers first
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next().map(str::trim) {
                if !first_ip.is_empty() {
                    return Some(first_ip.to_string());
                }
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            if !ip_str.trim().is_empty() {
                return Some(ip_str.trim().to_string());
            }
        }
    }

    // Fallback to connection info
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}
