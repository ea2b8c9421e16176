use std::collections::HashMap;

use crate::error::SessionError;
use crate::session::Session;

/// Trait for session storage backends.
pub trait SessionStore: Send + Sync {
    /// Get an existing session or create a new one.
    fn get_or_create(&mut self, key: &str) -> &mut Session;

    /// Save a session.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Save a session by key (looks up in cache).
    fn save_by_key(&self, key: &str) -> Result<(), SessionError>;

    /// Delete a session.
    fn delete(&mut self, key: &str) -> bool;

    /// List all sessions.
    fn list_sessions(&self) -> Vec<serde_json::Value>;
}

/// In-memory session store. Sessions live as long as the store does;
/// saving is a no-op.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: HashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_or_create(&mut self, key: &str) -> &mut Session {
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| Session::new(key))
    }

    fn save(&self, _session: &Session) -> Result<(), SessionError> {
        Ok(())
    }

    fn save_by_key(&self, _key: &str) -> Result<(), SessionError> {
        Ok(())
    }

    fn delete(&mut self, key: &str) -> bool {
        self.sessions.remove(key).is_some()
    }

    fn list_sessions(&self) -> Vec<serde_json::Value> {
        let mut sessions: Vec<serde_json::Value> = self
            .sessions
            .values()
            .map(|s| {
                serde_json::json!({
                    "key": s.key,
                    "created_at": s.created_at.to_rfc3339(),
                    "updated_at": s.updated_at.to_rfc3339(),
                    "messages": s.messages.len(),
                })
            })
            .collect();
        sessions.sort_by(|a, b| {
            let ua = a.get("updated_at").and_then(|v| v.as_str()).unwrap_or("");
            let ub = b.get("updated_at").and_then(|v| v.as_str()).unwrap_or("");
            ub.cmp(ua)
        });
        sessions
    }
}
