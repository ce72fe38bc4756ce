//! Timer configuration and mode-transition contract.
//!
//! # Responsibility
//! - Define the session-timer state crossed by mode and running flag.
//! - Own the mode-transition rule, including the hyperfocus asymmetry.
//!
//! # Invariants
//! - `time_left_secs <= initial_duration_secs` holds in persisted state; an
//!   external ticking collaborator may undercut it transiently.
//! - Any mode switch forces `is_running = false` and clears the active task.

use crate::model::ident::EntryId;
use serde::{Deserialize, Serialize};

/// Default focus session length.
pub const FOCUS_DEFAULT_SECS: u32 = 25 * 60;
/// Default short-break length.
pub const SHORT_BREAK_DEFAULT_SECS: u32 = 5 * 60;
/// Default long-break length.
pub const LONG_BREAK_DEFAULT_SECS: u32 = 15 * 60;

/// Session mode driving the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    Hyperfocus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    /// Mode-specific default duration.
    ///
    /// Hyperfocus has none: switching into it keeps whatever duration is
    /// already configured, so a caller-supplied length survives the switch.
    pub fn default_duration_secs(self) -> Option<u32> {
        match self {
            Self::Focus => Some(FOCUS_DEFAULT_SECS),
            Self::Hyperfocus => None,
            Self::ShortBreak => Some(SHORT_BREAK_DEFAULT_SECS),
            Self::LongBreak => Some(LONG_BREAK_DEFAULT_SECS),
        }
    }

    /// Wire/storage name, e.g. `short_break`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Hyperfocus => "hyperfocus",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    /// Parses a wire/storage name back into a mode.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "focus" => Some(Self::Focus),
            "hyperfocus" => Some(Self::Hyperfocus),
            "short_break" => Some(Self::ShortBreak),
            "long_break" => Some(Self::LongBreak),
            _ => None,
        }
    }
}

/// Persisted countdown-timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Seconds remaining in the current session.
    pub time_left_secs: u32,
    /// Session length the countdown started from.
    pub initial_duration_secs: u32,
    /// Current session mode.
    pub mode: TimerMode,
    /// Whether the external ticker should be decrementing `time_left_secs`.
    pub is_running: bool,
    /// Task being worked on this session; resolved lazily against the
    /// registry, so a removed task leaves a stale reference here.
    pub active_task_id: Option<EntryId>,
    /// Body-double companion toggle.
    pub body_double_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            time_left_secs: FOCUS_DEFAULT_SECS,
            initial_duration_secs: FOCUS_DEFAULT_SECS,
            mode: TimerMode::Focus,
            is_running: false,
            active_task_id: None,
            body_double_enabled: false,
        }
    }
}

impl TimerConfig {
    /// Applies the mode-transition contract.
    ///
    /// Stops the countdown, clears the active task, resets the duration to
    /// the mode default (hyperfocus keeps the previous duration) and refills
    /// `time_left_secs` from it.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.is_running = false;
        self.active_task_id = None;
        if let Some(default_secs) = mode.default_duration_secs() {
            self.initial_duration_secs = default_secs;
        }
        self.time_left_secs = self.initial_duration_secs;
    }
}
