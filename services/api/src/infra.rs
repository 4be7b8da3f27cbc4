use chrono::{DateTime, NaiveDate, Utc};
use job_portal::portal::{SessionId, SessionRecord, SessionStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session table. Sessions do not survive a restart.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, SessionRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id))
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|_, record| record.updated_at > cutoff);
        Ok(before - guard.len())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> SessionRecord {
        SessionRecord::start(SessionId(id.to_string()))
    }

    #[test]
    fn duplicate_insert_conflicts() {
        let store = InMemorySessionStore::default();
        store.insert(record("session-1")).expect("first insert");

        assert!(matches!(
            store.insert(record("session-1")),
            Err(StoreError::Conflict)
        ));
    }

    #[test]
    fn update_requires_existing_session() {
        let store = InMemorySessionStore::default();

        assert!(matches!(
            store.update(record("ghost")),
            Err(StoreError::NotFound)
        ));
        assert!(store
            .fetch(&SessionId("ghost".to_string()))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn eviction_drops_only_idle_sessions() {
        let store = InMemorySessionStore::default();
        let mut stale = record("session-stale");
        stale.updated_at = Utc::now() - chrono::Duration::hours(2);
        store.insert(stale).expect("insert stale");
        store.insert(record("session-fresh")).expect("insert fresh");

        let evicted = store
            .evict_idle(Utc::now() - chrono::Duration::hours(1))
            .expect("sweep");

        assert_eq!(evicted, 1);
        assert!(store
            .fetch(&SessionId("session-stale".to_string()))
            .expect("fetch")
            .is_none());
        assert!(store
            .remove(&SessionId("session-fresh".to_string()))
            .expect("remove")
            .is_some());
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date(" 2003-05-01 "),
            Ok(NaiveDate::from_ymd_opt(2003, 5, 1).expect("valid"))
        );
        assert!(parse_date("01/05/2003")
            .expect_err("rejected")
            .contains("YYYY-MM-DD"));
    }
}
