use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::portal::catalog::{CollegeDirectory, JobCatalog};
use crate::portal::domain::{ApplicantProfile, Attachment, Degree, FormSubmission, JobPosting};
use crate::portal::eligibility::average_percent;
use crate::portal::flow::FlowContext;
use crate::portal::interviews::{
    InterviewBoard, InterviewEvent, InterviewListingError, InterviewSource,
};
use crate::portal::service::{FixedClock, PortalService};
use crate::portal::store::{SessionId, SessionRecord, SessionStore, StoreError};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date")
}

/// Birth date that makes the applicant exactly `age` on `today()`.
pub(super) fn born_years_ago(age: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026 - age, 2, 10).expect("valid date")
}

pub(super) fn infosys_trainee() -> JobPosting {
    JobPosting::new(
        "Infosys",
        "Software Trainee",
        &[Degree::BTech, Degree::BE],
        60.0,
        18,
        28,
    )
}

pub(super) fn banking_clerk() -> JobPosting {
    JobPosting::new("Banking Exam", "Clerk", &[Degree::Any], 55.0, 20, 30)
}

pub(super) fn tcs_analyst() -> JobPosting {
    JobPosting::new(
        "TCS",
        "Data Analyst Intern",
        &[Degree::BSc, Degree::BTech],
        65.0,
        21,
        26,
    )
}

pub(super) fn small_catalog() -> JobCatalog {
    JobCatalog::new(vec![infosys_trainee(), tcs_analyst(), banking_clerk()])
}

pub(super) fn profile(degree: Degree, tenth: f64, twelfth: f64, age: i32) -> ApplicantProfile {
    ApplicantProfile {
        full_name: "Priya Raman".to_string(),
        date_of_birth: born_years_ago(age),
        state: "Tamil Nadu".to_string(),
        college: "Anna University".to_string(),
        degree,
        tenth_percent: tenth,
        twelfth_percent: twelfth,
        age,
        average_percent: average_percent(tenth, twelfth),
        photo: Attachment::named("priya.jpg"),
        certificate: Attachment::named("degree.pdf"),
    }
}

pub(super) fn submission() -> FormSubmission {
    FormSubmission {
        full_name: "Priya Raman".to_string(),
        date_of_birth: Some(born_years_ago(22)),
        state: Some("Tamil Nadu".to_string()),
        college: Some("Anna University".to_string()),
        degree: Some(Degree::BTech),
        tenth_percent: Some(70.0),
        twelfth_percent: Some(70.0),
        photo: Some(Attachment::named("priya.jpg")),
        certificate: Some(Attachment::named("degree.pdf")),
    }
}

pub(super) fn flow_context<'a>(
    catalog: &'a JobCatalog,
    directory: &'a CollegeDirectory,
) -> FlowContext<'a> {
    FlowContext {
        catalog,
        directory,
        today: today(),
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<HashMap<SessionId, SessionRecord>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.records.lock().expect("store mutex poisoned").remove(id))
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| record.updated_at > cutoff);
        Ok(before - guard.len())
    }
}

impl MemoryStore {
    /// Pretend the session was last touched `idle` ago.
    pub(super) fn backdate(&self, id: &SessionId, idle: chrono::Duration) {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard.get_mut(id).expect("session present");
        record.updated_at = Utc::now() - idle;
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn evict_idle(&self, _cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

/// Interview source that counts how often it has been read.
#[derive(Default)]
pub(super) struct CountingSource {
    reads: AtomicUsize,
}

impl CountingSource {
    pub(super) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl InterviewSource for CountingSource {
    fn fetch(&self) -> Result<Vec<InterviewEvent>, InterviewListingError> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(vec![InterviewEvent::new(
            "Infosys",
            "Chennai",
            format!("2026-02-{:02}", 10 + read.min(18)),
        )])
    }
}

pub(super) struct FailingSource;

impl InterviewSource for FailingSource {
    fn fetch(&self) -> Result<Vec<InterviewEvent>, InterviewListingError> {
        Err(InterviewListingError::Io {
            path: "interviews.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        })
    }
}

pub(super) fn build_service() -> (
    PortalService<MemoryStore>,
    Arc<MemoryStore>,
    Arc<CountingSource>,
) {
    let store = Arc::new(MemoryStore::default());
    let source = Arc::new(CountingSource::default());
    let board = Arc::new(InterviewBoard::new(source.clone()));
    let service = PortalService::new(store.clone(), board)
        .with_catalog(small_catalog())
        .with_clock(FixedClock(today()));
    (service, store, source)
}

pub(super) fn failing_interview_service() -> PortalService<MemoryStore> {
    let board = Arc::new(InterviewBoard::new(Arc::new(FailingSource)));
    PortalService::new(Arc::new(MemoryStore::default()), board)
        .with_catalog(small_catalog())
        .with_clock(FixedClock(today()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
