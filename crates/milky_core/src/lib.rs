//! Core state and session logic for Milky, a personal focus-session manager.
//! This crate is the single source of truth for task/timer/log invariants.

pub mod assistant;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use assistant::client::{AssistantClient, AssistantConfig, OFFLINE_FALLBACK};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::history::{HistoryRecord, Mood};
pub use model::ident::{epoch_ms_now, fresh_id, parse_entry_id, EntryId};
pub use model::log::{LogEntry, LogKind, MILKY_LOG_CAP, WELCOME_LINE};
pub use model::session::LastSessionSnapshot;
pub use model::task::{Quadrant, Task, TaskValidationError};
pub use model::timer::{TimerConfig, TimerMode};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use repo::persisted::PersistedField;
pub use service::focus_store::{
    FocusStore, StoreError, StoreResult, HISTORY_SLOT, LOGS_SLOT, TASKS_SLOT, TIMER_SLOT,
    UNKNOWN_TASK_LABEL,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
