//! Conversation sessions keyed by user id, with pluggable storage backends.

pub mod file_store;
pub mod store;

pub use file_store::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{ChatTurn, Transcript, TranscriptEntry};

/// A single message in session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A conversation session.
pub struct Session {
    pub key: String,
    pub messages: Vec<SessionMessage>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Session {
    pub fn new(key: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            key: key.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            metadata: HashMap::new(),
        }
    }

    /// Add a message to the session.
    pub fn add_message(&mut self, role: &str, content: &str) {
        self.messages.push(SessionMessage {
            role: role.to_string(),
            content: content.to_string(),
            timestamp: Some(crate::util::timestamp()),
            extra: HashMap::new(),
        });
        self.updated_at = chrono::Utc::now();
    }

    /// Get message history for model context (just role + content).
    pub fn get_history(&self, max_messages: usize) -> Vec<serde_json::Value> {
        let start = self.messages.len().saturating_sub(max_messages);
        self.messages[start..]
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role,
                    "content": m.content,
                })
            })
            .collect()
    }

    /// View the whole session as a transcript, the shape hand-off consumes.
    pub fn transcript(&self) -> Transcript {
        Transcript(
            self.messages
                .iter()
                .map(|m| {
                    TranscriptEntry::Turn(ChatTurn {
                        role: Some(m.role.clone()),
                        content: Some(m.content.clone()),
                        text: None,
                    })
                })
                .collect(),
        )
    }

    /// Clear all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = chrono::Utc::now();
    }
}
