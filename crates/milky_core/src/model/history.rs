//! Completed-session history model.
//!
//! # Responsibility
//! - Define the append-only ledger record for finished sessions.
//!
//! # Invariants
//! - Records are never mutated after creation.
//! - The ledger is ordered newest-first.

use crate::model::ident::{epoch_ms_now, fresh_id, EntryId};
use crate::model::timer::TimerMode;
use serde::{Deserialize, Serialize};

/// Post-session mood reflection value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Tired,
    Overwhelmed,
}

impl Mood {
    /// Wire/storage name, e.g. `good`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Tired => "tired",
            Self::Overwhelmed => "overwhelmed",
        }
    }

    /// Parses a wire/storage name back into a mood.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "great" => Some(Self::Great),
            "good" => Some(Self::Good),
            "okay" => Some(Self::Okay),
            "tired" => Some(Self::Tired),
            "overwhelmed" => Some(Self::Overwhelmed),
            _ => None,
        }
    }
}

/// One completed session in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Stable record id.
    pub id: EntryId,
    /// Completion time in Unix epoch milliseconds.
    pub timestamp_ms: i64,
    /// Session length in seconds, recorded as given by the caller.
    pub duration_secs: u32,
    /// Mode the session ran in.
    pub mode: TimerMode,
    /// Reflection mood, when the user provided one.
    pub mood: Option<Mood>,
}

impl HistoryRecord {
    /// Creates a record stamped with a fresh id and the current time.
    pub fn new(duration_secs: u32, mode: TimerMode, mood: Option<Mood>) -> Self {
        Self {
            id: fresh_id(),
            timestamp_ms: epoch_ms_now(),
            duration_secs,
            mode,
            mood,
        }
    }
}
