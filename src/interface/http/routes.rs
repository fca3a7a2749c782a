use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers::{
    get_settings_handler, health_handler, history_handler, status_handler,
    update_settings_handler, AppState,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/status", get(status_handler))
        .route("/api/history", get(history_handler))
        .route(
            "/api/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::{MemoryConfigStore, MemoryReportStore};
    use crate::application::{MonitorScheduler, SettingsService};
    use crate::domain::{ProbeOutcome, Target};
    use crate::ports::{ProbeTransport, ReportStore};

    struct StubTransport;

    #[async_trait]
    impl ProbeTransport for StubTransport {
        async fn execute(&self, _target: &Target, _timeout: Duration) -> ProbeOutcome {
            ProbeOutcome::reply("64 bytes from 9.9.9.9: icmp_seq=1 ttl=58 time=4.6 ms")
        }
    }

    async fn test_state() -> AppState {
        let settings = Arc::new(SettingsService::new(Arc::new(MemoryConfigStore::new())));
        let reports = Arc::new(MemoryReportStore::new(16));
        let monitor = MonitorScheduler::new(Arc::new(StubTransport))
            .with_display(reports.clone())
            .start(settings.subscribe())
            .unwrap();

        while reports.is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        AppState {
            settings,
            reports,
            monitor: Arc::new(monitor),
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn put_settings(body: &str) -> Request<Body> {
        Request::put("/api/settings")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_health() {
        let state = test_state().await;
        let router = create_router(state.clone());

        let (status, body) = send(router, Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "pingmon");

        state.monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reports_latest_cycle() {
        let state = test_state().await;
        let router = create_router(state.clone());

        let (status, body) = send(router, Request::get("/api/status").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "5 ms");
        assert_eq!(body["target"], "google.com");
        assert_eq!(body["report"]["status"]["state"], "reachable");

        state.monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_settings() {
        let state = test_state().await;
        let router = create_router(state.clone());

        let (status, body) = send(router.clone(), put_settings(r#"{"target": "9.9.9.9", "soundEnabled": false}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["domainToPing"], "9.9.9.9");
        assert_eq!(body["soundEnabled"], false);
        assert_eq!(state.settings.current().target.as_str(), "9.9.9.9");

        let (status, body) = send(router, Request::get("/api/settings").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["domainToPing"], "9.9.9.9");

        state.monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_settings_rejected() {
        let state = test_state().await;
        let router = create_router(state.clone());

        let (status, body) = send(router.clone(), put_settings(r#"{"intervalSeconds": 0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("interval"));
        assert_eq!(state.settings.current().interval_seconds, 1);

        let (status, _) = send(
            router,
            put_settings(r#"{"intervalSeconds": 18446744073709551615}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.settings.current().interval_seconds, 1);

        state.monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_history() {
        let state = test_state().await;
        let router = create_router(state.clone());

        let (status, body) = send(router, Request::get("/api/history?minutes=1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["reports"].as_array().unwrap().is_empty());

        state.monitor.shutdown().await;
    }
}
