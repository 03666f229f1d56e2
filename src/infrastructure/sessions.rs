use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone)]
struct Session {
    user_id: i32,
    expires_at: DateTime<Utc>,
}

/// Login sessions keyed by an opaque random token. Expired sessions are
/// dropped when looked up and swept whenever a new session starts.
#[derive(Debug, Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn start(&self, user_id: i32) -> Result<String, DomainError> {
        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let mut sessions = self.lock()?;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                user_id,
                expires_at: now + self.ttl,
            },
        );
        Ok(token)
    }

    pub fn user_id(&self, token: &str) -> Result<Option<i32>, DomainError> {
        let mut sessions = self.lock()?;
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session.user_id)),
            Some(_) => {
                sessions.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub fn end(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.lock()?.remove(token).is_some())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Session>>, DomainError> {
        self.sessions
            .lock()
            .map_err(|_| DomainError::Internal("session store lock poisoned".to_string()))
    }
}
