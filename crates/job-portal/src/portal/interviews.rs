use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

const NOT_LOADED_NOTICE: &str = "Interview data has not been loaded yet";
const UNAVAILABLE_NOTICE: &str = "Interview data file not found";

/// One scheduled recruitment drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewEvent {
    pub employer: String,
    pub location: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl InterviewEvent {
    pub fn new(
        employer: impl Into<String>,
        location: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        let date = date.into();
        Self {
            employer: employer.into(),
            location: location.into(),
            scheduled_on: parse_event_date(&date),
            date,
            role: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InterviewListingError {
    #[error("failed to read interview listing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid interview CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything that can produce the current interview schedule.
pub trait InterviewSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<InterviewEvent>, InterviewListingError>;
}

/// Reads the schedule from a CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct CsvInterviewSource {
    path: PathBuf,
}

impl CsvInterviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InterviewSource for CsvInterviewSource {
    fn fetch(&self) -> Result<Vec<InterviewEvent>, InterviewListingError> {
        let file = std::fs::File::open(&self.path).map_err(|source| InterviewListingError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_events(file)
    }
}

/// Fixed schedule, used when no listing file is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticInterviewSource {
    events: Vec<InterviewEvent>,
}

impl StaticInterviewSource {
    pub fn new(events: Vec<InterviewEvent>) -> Self {
        Self { events }
    }

    pub fn sample() -> Self {
        Self::new(vec![
            InterviewEvent::new("Infosys", "Chennai", "15 Feb 2026"),
            InterviewEvent::new("TCS", "Bangalore", "18 Feb 2026"),
            InterviewEvent::new("Wipro", "Hyderabad", "20 Feb 2026"),
        ])
    }
}

impl InterviewSource for StaticInterviewSource {
    fn fetch(&self) -> Result<Vec<InterviewEvent>, InterviewListingError> {
        Ok(self.events.clone())
    }
}

pub fn parse_events<R: Read>(reader: R) -> Result<Vec<InterviewEvent>, InterviewListingError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    for row in csv_reader.deserialize::<InterviewRow>() {
        let row = row?;
        events.push(InterviewEvent {
            scheduled_on: parse_event_date(&row.date),
            employer: row.employer,
            location: row.location,
            date: row.date,
            role: row.role,
        });
    }

    Ok(events)
}

#[derive(Debug, Deserialize)]
struct InterviewRow {
    #[serde(alias = "Company", alias = "Employer", alias = "company")]
    employer: String,
    #[serde(alias = "Location")]
    location: String,
    #[serde(alias = "Date")]
    date: String,
    #[serde(
        alias = "Role",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    role: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_event_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    ["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Latest known state of the interview schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterviewListing {
    Available {
        events: Vec<InterviewEvent>,
        refreshed_at: DateTime<Utc>,
    },
    Unavailable {
        notice: String,
    },
}

impl InterviewListing {
    pub fn is_available(&self) -> bool {
        matches!(self, InterviewListing::Available { .. })
    }
}

/// Shared holder of the most recent listing read.
pub struct InterviewBoard {
    source: Arc<dyn InterviewSource>,
    latest: RwLock<InterviewListing>,
}

impl InterviewBoard {
    pub fn new(source: Arc<dyn InterviewSource>) -> Self {
        Self {
            source,
            latest: RwLock::new(InterviewListing::Unavailable {
                notice: NOT_LOADED_NOTICE.to_string(),
            }),
        }
    }

    /// Re-read the source and publish the outcome. Failures become a notice.
    pub fn refresh(&self) -> InterviewListing {
        let listing = match self.source.fetch() {
            Ok(events) => {
                debug!(events = events.len(), "interview listing refreshed");
                InterviewListing::Available {
                    events,
                    refreshed_at: Utc::now(),
                }
            }
            Err(err) => {
                warn!(error = %err, "interview listing unavailable");
                InterviewListing::Unavailable {
                    notice: UNAVAILABLE_NOTICE.to_string(),
                }
            }
        };

        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = listing.clone();
        listing
    }

    pub fn latest(&self) -> InterviewListing {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for InterviewBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewBoard")
            .field("latest", &self.latest())
            .finish_non_exhaustive()
    }
}
