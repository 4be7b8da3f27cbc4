use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use job_portal::portal::{portal_router, PortalService, SessionStore};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_portal_routes<S>(service: Arc<PortalService<S>>) -> axum::Router
where
    S: SessionStore + 'static,
{
    portal_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySessionStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use job_portal::portal::{InterviewBoard, StaticInterviewSource};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn router(ready: bool) -> axum::Router {
        let board = Arc::new(InterviewBoard::new(Arc::new(StaticInterviewSource::sample())));
        let service = Arc::new(PortalService::new(
            Arc::new(InMemorySessionStore::default()),
            board,
        ));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };
        with_portal_routes(service).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (status, body) = get(router(false), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let (status, body) = get(router(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get(router(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn portal_routes_are_mounted() {
        let (status, body) = get(router(true), "/api/v1/interviews").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unavailable");

        let (status, body) = get(router(true), "/api/v1/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["postings"].as_array().map(Vec::len), Some(23));
    }
}
