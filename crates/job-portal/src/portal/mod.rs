//! Applicant intake, eligibility matching, and the form → result session flow.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod flow;
pub mod intake;
pub mod interviews;
pub mod refresh;
pub mod router;
pub mod service;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{CollegeDirectory, JobCatalog, StateColleges};
pub use domain::{
    ApplicantProfile, Attachment, Degree, EligibleJob, FormSubmission, JobPosting,
    DEGREE_PLACEHOLDER,
};
pub use eligibility::{
    age_on, average_percent, eligible_jobs, match_postings, EligibilityCriteria,
};
pub use flow::{
    FlowContext, PortalPage, ResultSnapshot, SessionEvent, SessionState, TransitionError,
};
pub use intake::{
    AttachmentSlot, IntakeGuard, IntakeRejection, IntakeViolation, ScoreField,
    MINIMUM_APPLICANT_AGE,
};
pub use interviews::{
    CsvInterviewSource, InterviewBoard, InterviewEvent, InterviewListing, InterviewListingError,
    InterviewSource, StaticInterviewSource,
};
pub use refresh::{spawn_interview_refresh, spawn_session_sweep};
pub use router::portal_router;
pub use service::{Clock, FixedClock, PortalService, PortalServiceError, SystemClock};
pub use store::{SessionId, SessionRecord, SessionStore, StoreError};
pub use views::{FormView, PortalView, ResultView, NO_MATCH_NOTICE};
