use serde::Serialize;

use super::catalog::{CollegeDirectory, StateColleges};
use super::domain::{Degree, EligibleJob};
use super::flow::ResultSnapshot;
use super::interviews::InterviewListing;
use super::store::SessionId;

pub const NO_MATCH_NOTICE: &str = "No jobs found matching your eligibility";

/// Everything needed to render the page a session is on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PortalView {
    Form(FormView),
    Result(ResultView),
}

impl PortalView {
    pub fn session_id(&self) -> &SessionId {
        match self {
            PortalView::Form(view) => &view.session_id,
            PortalView::Result(view) => &view.session_id,
        }
    }
}

/// Blank intake form with its dropdown choices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub session_id: SessionId,
    pub states: Vec<StateColleges>,
    pub degrees: Vec<Degree>,
}

impl FormView {
    pub fn new(session_id: SessionId, directory: &CollegeDirectory) -> Self {
        Self {
            session_id,
            states: directory.states().to_vec(),
            degrees: Degree::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub session_id: SessionId,
    pub greeting: String,
    pub full_name: String,
    pub age: i32,
    pub eligible_jobs: Vec<EligibleJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub interviews: InterviewListing,
    pub refresh_interval_secs: u64,
}

impl ResultView {
    pub fn new(
        session_id: SessionId,
        snapshot: &ResultSnapshot,
        interviews: InterviewListing,
        refresh_interval_secs: u64,
    ) -> Self {
        let notice = snapshot
            .eligible_jobs
            .is_empty()
            .then(|| NO_MATCH_NOTICE.to_string());

        Self {
            session_id,
            greeting: snapshot.greeting(),
            full_name: snapshot.full_name.clone(),
            age: snapshot.age,
            eligible_jobs: snapshot.eligible_jobs.clone(),
            notice,
            interviews,
            refresh_interval_secs,
        }
    }
}
