//! In-memory registry of map sessions.
//!
//! Each session owns one [`ObservationStore`], so two browser tabs looking at
//! different dates never see each other's selection or target date.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::services::store::ObservationStore;

/// One map view's state.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub store: Mutex<ObservationStore>,
}

/// Shared session table, cheap to clone into request handlers.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session and return it.
    pub fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            store: Mutex::new(ObservationStore::new()),
        });
        self.sessions
            .write()
            .insert(session.id, Arc::clone(&session));
        session
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Drop a session. In-flight refreshes holding the `Arc` finish on the
    /// detached store.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
