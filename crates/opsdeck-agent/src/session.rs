//! Per-session conversation memory.
//!
//! Each realtime connection gets its own history, keyed by session id:
//! created on connect, dropped on disconnect. Lock acquisitions are brief
//! map operations that never span `.await` points; turn processing works
//! on a snapshot and writes the result back.

use crate::message::ChatMessage;
use std::collections::HashMap;
use std::sync::RwLock;

/// Session-id → message-history map.
#[derive(Debug, Default)]
pub struct ConversationStore {
    sessions: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<ChatMessage>>> {
        self.sessions.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<ChatMessage>>> {
        self.sessions.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates a fresh history seeded with the system prompt. Replaces any
    /// stale history under the same id.
    pub fn create(&self, session_id: &str, system_prompt: &str) {
        self.write()
            .insert(session_id.to_string(), vec![ChatMessage::system(system_prompt)]);
    }

    /// Drops the session's history. Idempotent.
    pub fn remove(&self, session_id: &str) {
        self.write().remove(session_id);
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.read().contains_key(session_id)
    }

    /// Clones the current history for turn processing.
    pub fn snapshot(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        self.read().get(session_id).cloned()
    }

    /// Writes a processed turn's history back. A session that disconnected
    /// mid-turn is gone from the map; its result is discarded.
    pub fn replace(&self, session_id: &str, messages: Vec<ChatMessage>) {
        let mut sessions = self.write();
        if let Some(history) = sessions.get_mut(session_id) {
            *history = messages;
        }
    }

    /// Number of messages in a session's history.
    pub fn message_count(&self, session_id: &str) -> usize {
        self.read().get(session_id).map_or(0, Vec::len)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.read().len()
    }
}
