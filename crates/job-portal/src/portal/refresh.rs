use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::interviews::InterviewBoard;
use super::service::PortalService;
use super::store::SessionStore;

/// Re-read the interview listing every `every`, starting immediately.
///
/// Reads run on the blocking pool. The task runs until the handle is aborted
/// or the runtime shuts down.
pub fn spawn_interview_refresh(board: Arc<InterviewBoard>, every: Duration) -> JoinHandle<()> {
    info!(interval_secs = every.as_secs(), "interview refresh scheduled");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let board = board.clone();
            if let Err(err) = tokio::task::spawn_blocking(move || board.refresh()).await {
                warn!(error = %err, "interview refresh task failed");
            }
        }
    })
}

/// Evict sessions idle for at least `ttl`, checking every `every`.
pub fn spawn_session_sweep<S>(
    service: Arc<PortalService<S>>,
    ttl: Duration,
    every: Duration,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    info!(
        ttl_secs = ttl.as_secs(),
        interval_secs = every.as_secs(),
        "session sweep scheduled"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(err) = service.evict_idle(ttl) {
                warn!(error = %err, "session sweep failed");
            }
        }
    })
}
