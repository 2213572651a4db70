//! Declarative endpoint table.
//!
//! Each service lists its HTTP surface as [`Endpoint`] values (method, path,
//! required capability, handler) and hands the list to [`build_routes`],
//! which registers the handlers and wraps the protected ones with the
//! capability check.

use crate::middleware::capability::require_capability;
use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::routing::MethodRouter;
use axum::Router;

pub struct Endpoint<S> {
    pub method: Method,
    pub path: &'static str,
    /// `None` marks a public endpoint.
    pub capability: Option<&'static str>,
    pub handler: MethodRouter<S>,
}

impl<S> Endpoint<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(
        method: Method,
        path: &'static str,
        capability: Option<&'static str>,
        handler: MethodRouter<S>,
    ) -> Self {
        Self {
            method,
            path,
            capability,
            handler,
        }
    }

    pub fn public(method: Method, path: &'static str, handler: MethodRouter<S>) -> Self {
        Self::new(method, path, None, handler)
    }

    pub fn protected(
        method: Method,
        path: &'static str,
        capability: &'static str,
        handler: MethodRouter<S>,
    ) -> Self {
        Self::new(method, path, Some(capability), handler)
    }
}

/// Register every endpoint on a fresh router. Endpoints sharing a path are
/// merged into one method router by axum.
pub fn build_routes<S>(endpoints: Vec<Endpoint<S>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    endpoints.into_iter().fold(Router::new(), |router, endpoint| {
        tracing::debug!(
            method = %endpoint.method,
            path = endpoint.path,
            capability = endpoint.capability.unwrap_or("public"),
            "Registering endpoint"
        );

        let handler = match endpoint.capability {
            Some(capability) => endpoint.handler.route_layer(middleware::from_fn(
                move |req: Request, next: Next| require_capability(capability, req, next),
            )),
            None => endpoint.handler,
        };

        router.route(endpoint.path, handler)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::capability::CAPABILITIES_HEADER;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::{get, post};
    use tower::ServiceExt;

    fn router() -> Router {
        build_routes(vec![
            Endpoint::public(Method::GET, "/notes/public", get(|| async { "public" })),
            Endpoint::protected(Method::GET, "/notes", "note:read", get(|| async { "list" })),
            Endpoint::protected(Method::POST, "/notes", "note:write", post(|| async { "create" })),
        ])
    }

    async fn status_of(method: Method, uri: &str, capabilities: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().method(method).uri(uri);
        if let Some(caps) = capabilities {
            builder = builder.header(CAPABILITIES_HEADER, caps);
        }
        router()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn public_endpoint_needs_no_capability() {
        assert_eq!(
            status_of(Method::GET, "/notes/public", None).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn protected_endpoint_rejects_missing_capability() {
        assert_eq!(
            status_of(Method::GET, "/notes", None).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn methods_on_same_path_check_their_own_capability() {
        assert_eq!(
            status_of(Method::GET, "/notes", Some("note:read")).await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(Method::POST, "/notes", Some("note:read")).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(Method::POST, "/notes", Some("note:write")).await,
            StatusCode::OK
        );
    }
}
