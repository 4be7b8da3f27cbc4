use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use super::catalog::{CollegeDirectory, JobCatalog};
use super::domain::FormSubmission;
use super::flow::{FlowContext, SessionEvent, SessionState, TransitionError};
use super::interviews::InterviewBoard;
use super::store::{SessionId, SessionRecord, SessionStore, StoreError};
use super::views::{FormView, PortalView, ResultView};

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Source of "today" for age calculations.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

/// Service composing the session store, the static catalog, and the interview board.
pub struct PortalService<S> {
    store: Arc<S>,
    catalog: Arc<JobCatalog>,
    directory: Arc<CollegeDirectory>,
    interviews: Arc<InterviewBoard>,
    clock: Arc<dyn Clock>,
    refresh_interval: Duration,
}

impl<S> PortalService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, interviews: Arc<InterviewBoard>) -> Self {
        Self {
            store,
            catalog: Arc::new(JobCatalog::standard()),
            directory: Arc::new(CollegeDirectory::standard()),
            interviews,
            clock: Arc::new(SystemClock),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_catalog(mut self, catalog: JobCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_directory(mut self, directory: CollegeDirectory) -> Self {
        self.directory = Arc::new(directory);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &CollegeDirectory {
        &self.directory
    }

    pub fn interviews(&self) -> &InterviewBoard {
        &self.interviews
    }

    /// Open a new session on the form page.
    pub fn start(&self) -> Result<PortalView, PortalServiceError> {
        let record = self.store.insert(SessionRecord::start(next_session_id()))?;
        info!(session = %record.id, "session started");
        Ok(self.render(&record))
    }

    /// Current page of an existing session.
    pub fn view(&self, session_id: &SessionId) -> Result<PortalView, PortalServiceError> {
        let record = self.load(session_id)?;
        Ok(self.render(&record))
    }

    /// Submit the intake form. On success the session moves to the result page.
    pub fn submit(
        &self,
        session_id: &SessionId,
        submission: FormSubmission,
    ) -> Result<PortalView, PortalServiceError> {
        let record = self.apply(session_id, SessionEvent::Submit(submission))?;
        self.interviews.refresh();
        Ok(self.render(&record))
    }

    /// Leave the result page and return to a blank form.
    pub fn go_back(&self, session_id: &SessionId) -> Result<PortalView, PortalServiceError> {
        let record = self.apply(session_id, SessionEvent::GoBack)?;
        Ok(self.render(&record))
    }

    /// End a session explicitly. Its state is discarded.
    pub fn end(&self, session_id: &SessionId) -> Result<(), PortalServiceError> {
        match self.store.remove(session_id)? {
            Some(record) => {
                info!(session = %record.id, "session ended");
                Ok(())
            }
            None => Err(StoreError::NotFound.into()),
        }
    }

    /// Discard sessions untouched for at least `idle_for`.
    pub fn evict_idle(&self, idle_for: Duration) -> Result<usize, PortalServiceError> {
        let Some(cutoff) = chrono::Duration::from_std(idle_for)
            .ok()
            .and_then(|idle| Utc::now().checked_sub_signed(idle))
        else {
            return Ok(0);
        };

        let evicted = self.store.evict_idle(cutoff)?;
        if evicted > 0 {
            info!(evicted, idle_secs = idle_for.as_secs(), "idle sessions evicted");
        }
        Ok(evicted)
    }

    fn apply(
        &self,
        session_id: &SessionId,
        event: SessionEvent,
    ) -> Result<SessionRecord, PortalServiceError> {
        let mut record = self.load(session_id)?;
        let context = FlowContext {
            catalog: &self.catalog,
            directory: &self.directory,
            today: self.clock.today(),
        };

        let next = match record.state.transition(event, context) {
            Ok(next) => next,
            Err(err) => {
                warn!(session = %record.id, error = %err, "transition refused");
                return Err(err.into());
            }
        };

        info!(
            session = %record.id,
            from = record.state.page().label(),
            to = next.page().label(),
            "session transition"
        );
        record.state = next;
        record.updated_at = Utc::now();
        self.store.update(record.clone())?;
        Ok(record)
    }

    fn load(&self, session_id: &SessionId) -> Result<SessionRecord, PortalServiceError> {
        let record = self.store.fetch(session_id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    fn render(&self, record: &SessionRecord) -> PortalView {
        match &record.state {
            SessionState::Form => {
                PortalView::Form(FormView::new(record.id.clone(), &self.directory))
            }
            SessionState::Result(snapshot) => PortalView::Result(ResultView::new(
                record.id.clone(),
                snapshot,
                self.interviews.latest(),
                self.refresh_interval.as_secs(),
            )),
        }
    }
}

/// Error raised by the portal service.
#[derive(Debug, thiserror::Error)]
pub enum PortalServiceError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
