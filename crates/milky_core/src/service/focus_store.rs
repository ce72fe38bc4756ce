//! Focus-session state core.
//!
//! # Responsibility
//! - Own the persisted task/log/timer/history state and the in-memory
//!   last-session snapshot.
//! - Enforce the chat-log cap and the timer mode-transition contract.
//!
//! # Invariants
//! - Every mutation is written through its backing slot before returning.
//! - The chat log never exceeds `MILKY_LOG_CAP` entries and stays
//!   newest-first.
//! - Operations on absent ids are silent no-ops, never errors; the UI may
//!   race ahead of state.

use crate::model::history::{HistoryRecord, Mood};
use crate::model::ident::EntryId;
use crate::model::log::{LogEntry, LogKind, MILKY_LOG_CAP, WELCOME_LINE};
use crate::model::session::LastSessionSnapshot;
use crate::model::task::{Quadrant, Task, TaskValidationError};
use crate::model::timer::{TimerConfig, TimerMode};
use crate::repo::kv_repo::{KvRepository, RepoError};
use crate::repo::persisted::PersistedField;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot holding the task list.
pub const TASKS_SLOT: &str = "milky-tasks";
/// Slot holding the chat log.
pub const LOGS_SLOT: &str = "milky-logs";
/// Slot holding the timer configuration.
pub const TIMER_SLOT: &str = "milky-timer-config";
/// Slot holding the session history ledger.
pub const HISTORY_SLOT: &str = "milky-history";

/// Label resolved for an `active_task_id` that no longer matches a task.
pub const UNKNOWN_TASK_LABEL: &str = "Unknown Task";

pub type StoreResult<T> = Result<T, StoreError>;

/// Service error for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Rejected input, e.g. empty task text.
    Validation(TaskValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Per-process focus-session state, write-through persisted.
///
/// Constructed once and passed to every consumer needing state access; the
/// store is the single writer for all four slots.
pub struct FocusStore<R: KvRepository> {
    repo: R,
    tasks: PersistedField<Vec<Task>>,
    logs: PersistedField<Vec<LogEntry>>,
    timer: PersistedField<TimerConfig>,
    history: PersistedField<Vec<HistoryRecord>>,
    last_session: LastSessionSnapshot,
}

impl<R: KvRepository> FocusStore<R> {
    /// Opens the store over a ready repository, loading all persisted slots.
    ///
    /// A fresh backing store starts with an empty task list, the welcome
    /// bubble in the chat log, focus-mode timer defaults and empty history.
    pub fn open(repo: R) -> StoreResult<Self> {
        let tasks = PersistedField::load(&repo, TASKS_SLOT, Vec::new())?;
        let logs = PersistedField::load(
            &repo,
            LOGS_SLOT,
            vec![LogEntry::new(WELCOME_LINE, LogKind::Milky)],
        )?;
        let timer = PersistedField::load(&repo, TIMER_SLOT, TimerConfig::default())?;
        let history = PersistedField::load(&repo, HISTORY_SLOT, Vec::new())?;

        Ok(Self {
            repo,
            tasks,
            logs,
            timer,
            history,
            last_session: LastSessionSnapshot::default(),
        })
    }

    // --- Task registry ---

    /// Adds a task to the board and announces it in the chat log.
    ///
    /// # Side effects
    /// - Exactly one chat-log insertion per call.
    pub fn add_task(
        &mut self,
        text: impl Into<String>,
        quadrant: Quadrant,
    ) -> StoreResult<Task> {
        let task = Task::new(text, quadrant)?;
        self.tasks
            .update(&self.repo, |tasks| tasks.push(task.clone()))?;
        self.push_log_entry(LogEntry::new(
            format!("Added to {}: \"{}\"", quadrant.banner(), task.text),
            LogKind::Milky,
        ))?;
        debug!(
            "event=task_add module=store status=ok quadrant={} id={}",
            quadrant.as_str(),
            task.id
        );
        Ok(task)
    }

    /// Removes a task by id. Returns whether a removal occurred.
    pub fn remove_task(&mut self, id: EntryId) -> StoreResult<bool> {
        if !self.tasks.get().iter().any(|task| task.id == id) {
            return Ok(false);
        }
        self.tasks
            .update(&self.repo, |tasks| tasks.retain(|task| task.id != id))?;
        debug!("event=task_remove module=store status=ok id={id}");
        Ok(true)
    }

    /// Flips a task's completion flag; no-op when the id is absent.
    ///
    /// Deliberately emits no log entry: callers that want praise on
    /// completion request it from the assistant first, so acknowledgment
    /// precedes the completion record.
    pub fn toggle_task_complete(&mut self, id: EntryId) -> StoreResult<()> {
        if !self.tasks.get().iter().any(|task| task.id == id) {
            return Ok(());
        }
        Ok(self.tasks.update(&self.repo, |tasks| {
            if let Some(task) = tasks.iter_mut().find(|task| task.id == id) {
                task.completed = !task.completed;
            }
        })?)
    }

    /// Appends one assistant-produced step to a task; no-op when absent.
    pub fn append_task_ai_step(
        &mut self,
        id: EntryId,
        step: impl Into<String>,
    ) -> StoreResult<()> {
        if !self.tasks.get().iter().any(|task| task.id == id) {
            return Ok(());
        }
        let step = step.into();
        Ok(self.tasks.update(&self.repo, |tasks| {
            if let Some(task) = tasks.iter_mut().find(|task| task.id == id) {
                task.ai_steps.push(step);
            }
        })?)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.get()
    }

    /// Tasks of one quadrant, in insertion order.
    pub fn tasks_in_quadrant(&self, quadrant: Quadrant) -> impl Iterator<Item = &Task> {
        self.tasks
            .get()
            .iter()
            .filter(move |task| task.quadrant == quadrant)
    }

    // --- Chat log ---

    /// Inserts a chat-log entry at the head and returns its id.
    ///
    /// The returned id is the sole safe handle for later in-place updates;
    /// positions shift as entries arrive and evict.
    pub fn add_log(&mut self, text: impl Into<String>, kind: LogKind) -> StoreResult<EntryId> {
        self.push_log_entry(LogEntry::new(text, kind))
    }

    /// Inserts an assistant/system entry at the head and returns its id.
    pub fn add_milky_log(&mut self, text: impl Into<String>) -> StoreResult<EntryId> {
        self.add_log(text, LogKind::Milky)
    }

    /// Replaces an entry's text in place, keyed strictly by id.
    ///
    /// A no-op once the entry has been evicted; an async reply resolving
    /// late must not disturb whatever now occupies its old position.
    pub fn update_log_content(
        &mut self,
        id: EntryId,
        new_text: impl Into<String>,
    ) -> StoreResult<()> {
        if !self.logs.get().iter().any(|entry| entry.id == id) {
            return Ok(());
        }
        let new_text = new_text.into();
        Ok(self.logs.update(&self.repo, |logs| {
            if let Some(entry) = logs.iter_mut().find(|entry| entry.id == id) {
                entry.text = new_text;
            }
        })?)
    }

    /// Chat log, newest first.
    pub fn logs(&self) -> &[LogEntry] {
        self.logs.get()
    }

    fn push_log_entry(&mut self, entry: LogEntry) -> StoreResult<EntryId> {
        let id = entry.id;
        self.logs.update(&self.repo, |logs| {
            logs.insert(0, entry);
            logs.truncate(MILKY_LOG_CAP);
        })?;
        Ok(id)
    }

    // --- Timer state machine ---

    /// Switches the timer mode.
    ///
    /// The only mode-transition entry point: stops the countdown, clears the
    /// active task and resets the duration per the mode contract
    /// (hyperfocus preserves the configured duration).
    pub fn set_timer_mode(&mut self, mode: TimerMode) -> StoreResult<()> {
        self.timer
            .update(&self.repo, |timer| timer.switch_mode(mode))?;
        debug!("event=timer_mode module=store status=ok mode={}", mode.as_str());
        Ok(())
    }

    /// Starts or pauses the countdown without touching mode or durations.
    pub fn set_timer_running(&mut self, running: bool) -> StoreResult<()> {
        Ok(self.timer
            .update(&self.repo, |timer| timer.is_running = running)?)
    }

    /// Records the remaining time reported by the external ticker.
    ///
    /// Clamped so persisted state keeps `time_left <= initial_duration`.
    pub fn set_time_left(&mut self, seconds: u32) -> StoreResult<()> {
        Ok(self.timer.update(&self.repo, |timer| {
            timer.time_left_secs = seconds.min(timer.initial_duration_secs);
        })?)
    }

    /// Overrides the session length (duration slider), restarting the
    /// countdown from the new value.
    pub fn set_timer_duration(&mut self, seconds: u32) -> StoreResult<()> {
        Ok(self.timer.update(&self.repo, |timer| {
            timer.initial_duration_secs = seconds;
            timer.time_left_secs = seconds;
        })?)
    }

    /// Marks a task as being worked on this session, or clears the mark.
    ///
    /// The reference is not validated here; resolution is lazy via
    /// [`FocusStore::active_task_name`].
    pub fn set_active_task(&mut self, id: Option<EntryId>) -> StoreResult<()> {
        Ok(self.timer
            .update(&self.repo, |timer| timer.active_task_id = id)?)
    }

    /// Toggles the body-double companion.
    pub fn set_body_double(&mut self, enabled: bool) -> StoreResult<()> {
        Ok(self.timer
            .update(&self.repo, |timer| timer.body_double_enabled = enabled)?)
    }

    /// Current timer configuration.
    pub fn timer(&self) -> &TimerConfig {
        self.timer.get()
    }

    /// Resolves the active task reference against the registry.
    ///
    /// `None` when no task is active; the unknown-task label when the
    /// reference is stale; the task's text otherwise.
    pub fn active_task_name(&self) -> Option<String> {
        let id = self.timer.get().active_task_id?;
        let name = self
            .tasks
            .get()
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.text.clone())
            .unwrap_or_else(|| UNKNOWN_TASK_LABEL.to_string());
        Some(name)
    }

    // --- Session history ---

    /// Prepends a completed session to the ledger.
    ///
    /// No validation beyond shape; a zero duration is recorded as given.
    pub fn add_to_history(
        &mut self,
        duration_secs: u32,
        mode: TimerMode,
        mood: Option<Mood>,
    ) -> StoreResult<HistoryRecord> {
        let record = HistoryRecord::new(duration_secs, mode, mood);
        self.history
            .update(&self.repo, |history| history.insert(0, record.clone()))?;
        debug!(
            "event=history_add module=store status=ok mode={} duration_secs={duration_secs}",
            mode.as_str()
        );
        Ok(record)
    }

    /// Session history, newest first.
    pub fn history(&self) -> &[HistoryRecord] {
        self.history.get()
    }

    // --- Last-session snapshot ---

    /// Overwrites the ephemeral snapshot handed to the reflection step.
    pub fn set_last_session(&mut self, snapshot: LastSessionSnapshot) {
        self.last_session = snapshot;
    }

    /// Stats of the most recently finished session.
    pub fn last_session(&self) -> &LastSessionSnapshot {
        &self.last_session
    }
}
