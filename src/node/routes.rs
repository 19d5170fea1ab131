//! Node Routes
//!
//! Configures the Axum router for a cache node.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_handler, get_handler, health_handler, metrics_handler, prometheus_handler,
    set_handler, NodeState,
};

/// Creates the node router with all RPC endpoints configured.
///
/// # Middleware
/// - Tracing: Logs all requests for debugging
pub fn create_node_router(state: NodeState) -> Router {
    Router::new()
        .route("/rpc/get", post(get_handler))
        .route("/rpc/set", post(set_handler))
        .route("/rpc/delete", post(delete_handler))
        .route("/rpc/metrics", post(metrics_handler))
        .route("/metrics", get(prometheus_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_node_router(NodeState::new(2))
    }

    fn rpc(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_to_json(body: Body) -> Value {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rpc_set_then_get() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(rpc("/rpc/set", r#"{"key":"k","value":"dmFsdWU=","ttl":60}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(rpc("/rpc/get", r#"{"key":"k"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["found"], true);
        assert_eq!(json["value"], "dmFsdWU=");
    }

    #[tokio::test]
    async fn test_rpc_lru_eviction() {
        let app = create_test_app();

        for key in ["a", "b", "c"] {
            let body = format!(r#"{{"key":"{key}","value":"","ttl":60}}"#);
            app.clone().oneshot(rpc("/rpc/set", &body)).await.unwrap();
        }

        let response = app
            .clone()
            .oneshot(rpc("/rpc/get", r#"{"key":"a"}"#))
            .await
            .unwrap();
        assert_eq!(body_to_json(response.into_body()).await["found"], false);

        let response = app.oneshot(rpc("/rpc/metrics", "{}")).await.unwrap();
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["size"], 2);
        assert_eq!(json["evictions"], 1);
        assert_eq!(json["misses"], 1);
    }

    #[tokio::test]
    async fn test_rpc_delete() {
        let app = create_test_app();

        app.clone()
            .oneshot(rpc("/rpc/set", r#"{"key":"gone","value":"eA==","ttl":0}"#))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(rpc("/rpc/delete", r#"{"key":"gone"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(rpc("/rpc/get", r#"{"key":"gone"}"#)).await.unwrap();
        assert_eq!(body_to_json(response.into_body()).await["found"], false);
    }

    #[tokio::test]
    async fn test_rpc_rejects_malformed_body() {
        let app = create_test_app();

        let response = app
            .oneshot(rpc("/rpc/set", r#"{"key":"k","value":"not base64!"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_rpc_metrics_ignores_body() {
        let app = create_test_app();

        for body in ["", "not json"] {
            let request = Request::builder()
                .method("POST")
                .uri("/rpc/metrics")
                .body(Body::from(body))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let json = body_to_json(response.into_body()).await;
            assert_eq!(json["capacity"], 2);
        }
    }

    #[tokio::test]
    async fn test_prometheus_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("# TYPE cache_hits_total counter"));
        assert!(text.contains("# TYPE cache_size gauge"));
    }
}
