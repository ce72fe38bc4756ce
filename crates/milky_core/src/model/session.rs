//! Ephemeral last-session snapshot.
//!
//! # Responsibility
//! - Carry the just-finished session's stats to the post-session reflection
//!   step.
//!
//! # Invariants
//! - Never persisted and never restored; deliberately carries no serde
//!   derives so it cannot drift into a storage slot.
//! - Overwritten wholesale when a session ends.

use crate::model::history::Mood;
use crate::model::timer::TimerMode;

/// Stats handed from session completion to the reflection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSessionSnapshot {
    /// Length of the finished session in seconds.
    pub duration_secs: u32,
    /// Mode the finished session ran in.
    pub mode: TimerMode,
    /// Mood captured by the reflection step, once known.
    pub mood: Option<Mood>,
}

impl Default for LastSessionSnapshot {
    fn default() -> Self {
        Self {
            duration_secs: 0,
            mode: TimerMode::Focus,
            mood: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LastSessionSnapshot;
    use crate::model::timer::TimerMode;

    #[test]
    fn default_snapshot_is_empty_focus() {
        let snapshot = LastSessionSnapshot::default();
        assert_eq!(snapshot.duration_secs, 0);
        assert_eq!(snapshot.mode, TimerMode::Focus);
        assert_eq!(snapshot.mood, None);
    }
}
