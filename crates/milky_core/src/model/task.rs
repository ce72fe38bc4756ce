//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its priority-quadrant classification.
//! - Validate task text at construction time.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `quadrant` is fixed at creation and required.
//! - `ai_steps` starts empty; only the store's append operation grows it.

use crate::model::ident::{fresh_id, EntryId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Urgency/importance triage category for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Urgent and important.
    DoFirst,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    /// All quadrants in display order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    /// Wire/storage name, e.g. `do_first`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DoFirst => "do_first",
            Self::Schedule => "schedule",
            Self::Delegate => "delegate",
            Self::Eliminate => "eliminate",
        }
    }

    /// Uppercase banner used in system log lines, e.g. `DO FIRST`.
    pub fn banner(self) -> &'static str {
        match self {
            Self::DoFirst => "DO FIRST",
            Self::Schedule => "SCHEDULE",
            Self::Delegate => "DELEGATE",
            Self::Eliminate => "ELIMINATE",
        }
    }

    /// Parses a wire/storage name back into a quadrant.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "do_first" => Some(Self::DoFirst),
            "schedule" => Some(Self::Schedule),
            "delegate" => Some(Self::Delegate),
            "eliminate" => Some(Self::Eliminate),
            _ => None,
        }
    }
}

/// Validation failures for task construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task text is empty after trimming.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One task on the quadrant board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for removal, completion toggles and timer references.
    pub id: EntryId,
    /// Trimmed, non-empty task description.
    pub text: String,
    /// Priority quadrant, fixed at creation.
    pub quadrant: Quadrant,
    /// Completion flag; toggles freely.
    pub completed: bool,
    /// Assistant-produced breakdown steps; appended to, never rewritten.
    pub ai_steps: Vec<String>,
}

impl Task {
    /// Creates a task with a generated id, rejecting empty text.
    pub fn new(text: impl Into<String>, quadrant: Quadrant) -> Result<Self, TaskValidationError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(Self {
            id: fresh_id(),
            text,
            quadrant,
            completed: false,
            ai_steps: Vec::new(),
        })
    }
}
