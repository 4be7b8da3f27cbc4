use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flow::SessionState;

/// Opaque handle identifying one applicant session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored session state plus bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn start(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            state: SessionState::default(),
            started_at: now,
            updated_at: now,
        }
    }
}

/// Session-scoped storage. Implementations keep nothing across restarts.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError>;
    fn update(&self, record: SessionRecord) -> Result<(), StoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
    fn remove(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
    /// Drop every session whose `updated_at` is at or before `cutoff`; returns how many went.
    fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
