//! Capability enforcement for HTTP routes.
//!
//! The upstream gateway authenticates the caller and forwards the granted
//! capabilities in the `x-capabilities` header (comma separated). Routes
//! declare the capability they require in their endpoint definition and are
//! wrapped with [`require_capability`].

use crate::error::AppError;
use axum::http::HeaderMap;
use axum::{extract::Request, middleware::Next, response::Response};
use std::collections::HashSet;

pub const CAPABILITIES_HEADER: &str = "x-capabilities";

/// Grants every capability.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(HashSet<String>);

impl Capabilities {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let granted = headers
            .get_all(CAPABILITIES_HEADER)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        Self(granted)
    }

    /// `resource:*` grants every action on `resource`.
    pub fn allows(&self, required: &str) -> bool {
        if self.0.contains(WILDCARD) || self.0.contains(required) {
            return true;
        }
        required
            .split_once(':')
            .is_some_and(|(resource, _)| self.0.contains(&format!("{}:*", resource)))
    }
}

pub async fn require_capability(
    required: &'static str,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let capabilities = Capabilities::from_headers(req.headers());
    if !capabilities.allows(required) {
        tracing::warn!(
            required = required,
            path = %req.uri().path(),
            "Capability check failed"
        );
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Missing capability: {}",
            required
        )));
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CAPABILITIES_HEADER, value.parse().unwrap());
        headers
    }

    #[test]
    fn exact_capability_is_allowed() {
        let caps = Capabilities::from_headers(&headers("faq:read, invoice:write"));
        assert!(caps.allows("faq:read"));
        assert!(caps.allows("invoice:write"));
        assert!(!caps.allows("faq:write"));
    }

    #[test]
    fn resource_wildcard_covers_actions() {
        let caps = Capabilities::from_headers(&headers("leave:*"));
        assert!(caps.allows("leave:admin"));
        assert!(!caps.allows("invoice:read"));
    }

    #[test]
    fn global_wildcard_covers_everything() {
        let caps = Capabilities::from_headers(&headers("*"));
        assert!(caps.allows("reimbursement:write"));
    }

    #[test]
    fn missing_header_allows_nothing() {
        let caps = Capabilities::from_headers(&HeaderMap::new());
        assert!(!caps.allows("faq:read"));
    }
}
