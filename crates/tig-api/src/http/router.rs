//! Axum router configuration with middleware.
//!
//! Function endpoints and read-only views live under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Functions invoked by the workflow engine
        .route(
            "/functions/setup_channel_listener",
            post(handlers::function::setup_channel_listener),
        )
        .route(
            "/functions/send_alert",
            post(handlers::function::send_alert),
        )
        // Views
        .route("/watches", get(handlers::watch::list_watches))
        .route(
            "/channels/{channel}/routes",
            get(handlers::watch::list_routes),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tempfile::TempDir;
    use tig_types::config::AdvisorConfig;
    use tig_infra::sqlite::pool::{DatabasePool, database_url};
    use tig_types::id::ChannelId;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn json_response(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
    }

    async fn test_state(server: &MockServer, tmp: &TempDir) -> AppState {
        let mut config = AdvisorConfig::default();
        config.slack.api_base_url = server.uri();
        AppState::build(
            config,
            tmp.path().to_path_buf(),
            SecretString::from("xoxb-test".to_string()),
        )
        .await
        .unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn mount_empty_trigger_list(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/workflows.triggers.list"))
            .respond_with(json_response(serde_json::json!({"ok": true, "triggers": []})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let app = build_router(test_state(&server, &tmp).await);

        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_setup_creates_watch_and_confirms() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        mount_empty_trigger_list(&server).await;
        Mock::given(method("POST"))
            .and(path("/workflows.triggers.create"))
            .and(body_partial_json(serde_json::json!({
                "event": {"channel_ids": ["C1"]},
                "inputs": {"triggered_user": {"value": "U1"}}
            })))
            .respond_with(json_response(serde_json::json!({"ok": true, "trigger": {"id": "Ft1"}})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_partial_json(serde_json::json!({"channel": "U1"})))
            .respond_with(json_response(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server, &tmp).await;
        let routes = state.routes.clone();
        let app = build_router(state);

        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/setup_channel_listener",
                serde_json::json!({"channel": "C1", "user_to_alert": "U1"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await, serde_json::json!({"outputs": {}}));

        let saved = routes.list_by_channel(&ChannelId::new("C1")).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].user_to_alert.as_ref().map(|u| u.as_str()), Some("U1"));
    }

    #[tokio::test]
    async fn test_setup_lookup_failure_reports_error() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .and(path("/workflows.triggers.list"))
            .respond_with(json_response(
                serde_json::json!({"ok": false, "error": "invalid_auth"}),
            ))
            .mount(&server)
            .await;

        let app = build_router(test_state(&server, &tmp).await);
        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/setup_channel_listener",
                serde_json::json!({"channel": "C1", "user_to_alert": "U1"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            read_json(resp).await,
            serde_json::json!({"error": "Failed to lookup existing triggers: invalid_auth"})
        );
    }

    #[tokio::test]
    async fn test_setup_creation_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        mount_empty_trigger_list(&server).await;
        Mock::given(method("POST"))
            .and(path("/workflows.triggers.create"))
            .respond_with(json_response(
                serde_json::json!({"ok": false, "error": "ratelimited"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server, &tmp).await;
        let routes = state.routes.clone();
        let app = build_router(state);

        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/setup_channel_listener",
                serde_json::json!({"channel": "C1", "user_to_alert": "U1"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            read_json(resp).await,
            serde_json::json!({"error": "Failed to create trigger: ratelimited"})
        );

        // The route saved before the failed creation stays.
        let saved = routes.list_by_channel(&ChannelId::new("C1")).await.unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn test_setup_store_failure_is_internal_error() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .and(path("/workflows.triggers.list"))
            .respond_with(json_response(serde_json::json!({"ok": true, "triggers": []})))
            .expect(0)
            .mount(&server)
            .await;

        let state = test_state(&server, &tmp).await;

        // Break the store underneath the running state.
        let side = DatabasePool::new(&database_url(tmp.path())).await.unwrap();
        sqlx::query("DROP TABLE alert_routes")
            .execute(&side.writer)
            .await
            .unwrap();

        let app = build_router(state);
        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/setup_channel_listener",
                serde_json::json!({"channel": "C1", "user_to_alert": "U1"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = read_json(resp).await;
        let error = json["error"].as_str().unwrap();
        assert!(error.starts_with("Failed to save user to alert"));
    }

    #[tokio::test]
    async fn test_setup_rejects_blank_channel() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let app = build_router(test_state(&server, &tmp).await);

        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/setup_channel_listener",
                serde_json::json!({"channel": "  "}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(resp).await.get("error").is_some());
    }

    #[tokio::test]
    async fn test_send_alert_dms_triggered_user() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_partial_json(serde_json::json!({"channel": "U7"})))
            .respond_with(json_response(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(test_state(&server, &tmp).await);
        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/send_alert",
                serde_json::json!({"channel": "C1", "triggered_user": "U7"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await, serde_json::json!({"outputs": {}}));
    }

    #[tokio::test]
    async fn test_send_alert_missing_user_is_bad_request() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let app = build_router(test_state(&server, &tmp).await);

        let resp = app
            .oneshot(post_json(
                "/api/v1/functions/send_alert",
                serde_json::json!({"channel": "C1"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(resp).await.get("error").is_some());
    }

    #[tokio::test]
    async fn test_list_watches_envelope() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        mount_empty_trigger_list(&server).await;

        let app = build_router(test_state(&server, &tmp).await);
        let resp = app
            .oneshot(Request::get("/api/v1/watches").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = read_json(resp).await;
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["_links"]["self"], "/api/v1/watches");
    }

    #[tokio::test]
    async fn test_list_routes_for_unknown_channel_is_empty() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();

        let app = build_router(test_state(&server, &tmp).await);
        let resp = app
            .oneshot(
                Request::get("/api/v1/channels/C404/routes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["data"], serde_json::json!([]));
    }
}
