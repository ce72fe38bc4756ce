//! Chat-log domain model.
//!
//! # Responsibility
//! - Define the bounded, newest-first exchange log entry shape.
//!
//! # Invariants
//! - The log sequence never exceeds `MILKY_LOG_CAP` entries.
//! - Entry ids are the only safe handle for later in-place updates; a
//!   suspended async reply must never address an entry by position.

use crate::model::ident::{fresh_id, EntryId};
use serde::{Deserialize, Serialize};

/// Hard cap on retained chat-log entries; insertion past it evicts the tail.
pub const MILKY_LOG_CAP: usize = 10;

/// Seed bubble shown by a fresh store before any exchange happened.
pub const WELCOME_LINE: &str = "Ready to start. I'm listening if you need to chat or focus.";

/// Originator of a chat-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Assistant- or system-originated line.
    Milky,
    /// User-originated line.
    User,
}

/// One rendered exchange bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Stable handle returned at creation for later in-place updates.
    pub id: EntryId,
    /// Bubble text; replaceable via the store's update-by-handle operation.
    pub text: String,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub kind: LogKind,
}

impl LogEntry {
    /// Creates an entry with a generated id.
    pub fn new(text: impl Into<String>, kind: LogKind) -> Self {
        Self {
            id: fresh_id(),
            text: text.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LogEntry, LogKind};

    #[test]
    fn entry_serializes_kind_as_type_field() {
        let entry = LogEntry::new("hello", LogKind::User);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "user");
        assert_eq!(json["text"], "hello");

        let decoded: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn entries_get_distinct_ids() {
        let first = LogEntry::new("a", LogKind::Milky);
        let second = LogEntry::new("a", LogKind::Milky);
        assert_ne!(first.id, second.id);
    }
}
