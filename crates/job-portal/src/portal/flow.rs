//! Two-page navigation flow: the intake form and the eligibility results.
//!
//! The flow is a plain state machine. `SessionState::transition` never touches
//! the receiver, so a rejected event leaves the caller's state exactly as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{CollegeDirectory, JobCatalog};
use super::domain::{EligibleJob, FormSubmission};
use super::eligibility::eligible_jobs;
use super::intake::{IntakeGuard, IntakeRejection};

/// Page a session is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalPage {
    Form,
    Result,
}

impl PortalPage {
    pub const fn label(self) -> &'static str {
        match self {
            PortalPage::Form => "form",
            PortalPage::Result => "result",
        }
    }
}

/// What the result page remembers about the last accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub full_name: String,
    pub age: i32,
    pub eligible_jobs: Vec<EligibleJob>,
}

impl ResultSnapshot {
    pub fn greeting(&self) -> String {
        format!("Hello {}, Age: {}", self.full_name, self.age)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Form,
    Result(ResultSnapshot),
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Submit(FormSubmission),
    GoBack,
}

/// Read-only inputs a transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct FlowContext<'a> {
    pub catalog: &'a JobCatalog,
    pub directory: &'a CollegeDirectory,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error(transparent)]
    Rejected(#[from] IntakeRejection),
    #[error("a new submission requires returning to the form first")]
    SubmitOutsideForm,
}

impl SessionState {
    pub fn page(&self) -> PortalPage {
        match self {
            SessionState::Form => PortalPage::Form,
            SessionState::Result(_) => PortalPage::Result,
        }
    }

    pub fn result(&self) -> Option<&ResultSnapshot> {
        match self {
            SessionState::Form => None,
            SessionState::Result(snapshot) => Some(snapshot),
        }
    }

    pub fn transition(
        &self,
        event: SessionEvent,
        context: FlowContext<'_>,
    ) -> Result<SessionState, TransitionError> {
        match (self, event) {
            (SessionState::Form, SessionEvent::Submit(submission)) => {
                let profile = IntakeGuard::new(context.directory)
                    .profile_from_submission(submission, context.today)?;
                let eligible_jobs = eligible_jobs(&profile, context.catalog);
                debug!(
                    age = profile.age,
                    average = profile.average_percent,
                    matches = eligible_jobs.len(),
                    "submission accepted"
                );

                Ok(SessionState::Result(ResultSnapshot {
                    full_name: profile.full_name,
                    age: profile.age,
                    eligible_jobs,
                }))
            }
            (SessionState::Result(_), SessionEvent::Submit(_)) => {
                Err(TransitionError::SubmitOutsideForm)
            }
            (_, SessionEvent::GoBack) => Ok(SessionState::Form),
        }
    }
}
