use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use super::perms::perms_router;
use crate::perms::{Authorizer, GroupRegistry, Membership};
use crate::store::Store;

pub struct AppState {
    pub registry: GroupRegistry,
    pub membership: Membership,
    pub authorizer: Authorizer,
}

impl AppState {
    /// Builds every core component on top of one shared store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            registry: GroupRegistry::new(store.clone()),
            membership: Membership::new(store.clone()),
            authorizer: Authorizer::new(store),
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/namespaces", perms_router())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::store::MemoryStore;

    fn app() -> Router {
        create_router(Arc::new(AppState::new(Arc::new(MemoryStore::new()))))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_namespace_has_no_permissions() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/namespaces/beta/groups")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_group_name_is_bad_request() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/namespaces/alpha/groups")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"bad name"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
