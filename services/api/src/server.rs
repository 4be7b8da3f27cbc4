use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_portal::config::AppConfig;
use job_portal::error::AppError;
use job_portal::portal::{
    spawn_interview_refresh, spawn_session_sweep, CsvInterviewSource, InterviewBoard,
    PortalService,
};
use job_portal::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.interviews_csv.take() {
        config.portal.interviews_csv = path;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = CsvInterviewSource::new(config.portal.interviews_csv.clone());
    let interviews = Arc::new(InterviewBoard::new(Arc::new(source)));
    let refresh_task =
        spawn_interview_refresh(interviews.clone(), config.portal.refresh_interval);

    let store = Arc::new(InMemorySessionStore::default());
    let portal_service = Arc::new(
        PortalService::new(store, interviews)
            .with_refresh_interval(config.portal.refresh_interval),
    );

    let sweep_task = spawn_session_sweep(
        portal_service.clone(),
        config.portal.session_ttl,
        config.portal.session_ttl.min(MAX_SWEEP_INTERVAL),
    );

    let app = with_portal_routes(portal_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        interviews_csv = %config.portal.interviews_csv.display(),
        refresh_secs = config.portal.refresh_interval.as_secs(),
        session_ttl_secs = config.portal.session_ttl.as_secs(),
        "job portal ready"
    );

    let served = axum::serve(listener, app).await;
    refresh_task.abort();
    sweep_task.abort();
    served?;
    Ok(())
}
