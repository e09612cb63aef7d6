use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use freight_estimator::{config::FreightConfig, estimator::Estimator, session::Session};
use freight_routing::ors_api::OrsDirectionsClient;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

struct SessionEntry {
    session: Arc<Mutex<Session>>,
    last_access: Instant,
}

/// Sessions by id. A session lock is held for the whole estimation, so each
/// user has at most one request in flight. Sessions unused for longer than
/// the ttl are dropped.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self) -> Uuid {
        let now = Instant::now();
        let session_id = Uuid::new_v4();

        let mut sessions = self.sessions.write();

        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        if sessions.len() < before {
            debug!("Evicted {} expired sessions", before - sessions.len());
        }

        sessions.insert(
            session_id,
            SessionEntry {
                session: Arc::new(Mutex::new(Session::new())),
                last_access: now,
            },
        );
        session_id
    }

    /// Looks a session up and marks it as used.
    pub fn get(&self, session_id: &Uuid) -> Option<Arc<Mutex<Session>>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write();

        let expired = self.is_expired(sessions.get(session_id)?, now);
        if expired {
            sessions.remove(session_id);
            debug!("Session {} expired", session_id);
            return None;
        }

        let entry = sessions.get_mut(session_id)?;
        entry.last_access = now;
        Some(entry.session.clone())
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        // Still referenced by a handler while an estimation runs
        Arc::strong_count(&entry.session) == 1
            && now.saturating_duration_since(entry.last_access) >= self.ttl
    }
}

pub struct AppState {
    pub config: FreightConfig,
    pub estimator: Estimator<OrsDirectionsClient>,
    pub sessions: SessionStore,
}
