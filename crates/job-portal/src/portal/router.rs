use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::FormSubmission;
use super::flow::{PortalPage, TransitionError};
use super::service::{PortalService, PortalServiceError};
use super::store::{SessionId, SessionStore, StoreError};

/// Router builder exposing the session flow and the read-only reference data.
pub fn portal_router<S>(service: Arc<PortalService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(start_handler::<S>))
        .route(
            "/api/v1/sessions/:session_id",
            get(view_handler::<S>).delete(end_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/submit",
            post(submit_handler::<S>),
        )
        .route("/api/v1/sessions/:session_id/back", post(back_handler::<S>))
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/api/v1/colleges", get(colleges_handler::<S>))
        .route("/api/v1/interviews", get(interviews_handler::<S>))
        .with_state(service)
}

pub(crate) async fn start_handler<S>(State(service): State<Arc<PortalService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<S>(
    State(service): State<Arc<PortalService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.view(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<PortalService<S>>>,
    Path(session_id): Path<String>,
    payload: Result<Json<FormSubmission>, JsonRejection>,
) -> Response
where
    S: SessionStore + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let payload = json!({
                "page": PortalPage::Form.label(),
                "error": rejection.body_text(),
            });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    // Entering the result page re-reads the interview listing from disk.
    let outcome = tokio::task::spawn_blocking(move || {
        service.submit(&SessionId(session_id), submission)
    })
    .await;

    match outcome {
        Ok(Ok(view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok(Err(err)) => error_response(err),
        Err(join) => {
            let payload = json!({ "error": format!("submission task failed: {join}") });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn end_handler<S>(
    State(service): State<Arc<PortalService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.end(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn back_handler<S>(
    State(service): State<Arc<PortalService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.go_back(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn catalog_handler<S>(State(service): State<Arc<PortalService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    Json(json!({ "postings": service.catalog().postings() })).into_response()
}

async fn colleges_handler<S>(State(service): State<Arc<PortalService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    Json(json!({ "states": service.directory().states() })).into_response()
}

async fn interviews_handler<S>(State(service): State<Arc<PortalService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    Json(service.interviews().latest()).into_response()
}

fn error_response(err: PortalServiceError) -> Response {
    match err {
        PortalServiceError::Transition(TransitionError::Rejected(rejection)) => {
            let payload = json!({
                "page": PortalPage::Form.label(),
                "error": rejection.to_string(),
                "violations": rejection.messages(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        PortalServiceError::Transition(TransitionError::SubmitOutsideForm) => {
            let payload = json!({
                "page": PortalPage::Result.label(),
                "error": TransitionError::SubmitOutsideForm.to_string(),
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        PortalServiceError::Store(StoreError::NotFound) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        PortalServiceError::Store(StoreError::Conflict) => {
            let payload = json!({ "error": "session already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
