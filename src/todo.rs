use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String, // trimmed, never empty
    pub completed: bool,
    pub date: DateKey,
}

/// Hands out time-derived ids that never repeat within a session, even when
/// two todos are added in the same millisecond.
#[derive(Debug, Default)]
pub struct IdSource {
    last: Option<i64>,
}

impl IdSource {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn next_id(&mut self) -> TodoId {
        self.next_after(Local::now().timestamp_millis())
    }

    fn next_after(&mut self, now_ms: i64) -> TodoId {
        let id = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(id);
        TodoId(id)
    }
}
