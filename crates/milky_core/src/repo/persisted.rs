//! Durable value cell over one key-value slot.
//!
//! # Responsibility
//! - Load a field's stored value at construction, falling back to its
//!   initial value when the slot is empty or unparseable.
//! - Write every mutation back to the slot before returning to the caller.
//!
//! # Invariants
//! - A corrupt stored payload is dropped in favor of the initial value;
//!   losing broken state is preferred over refusing to start the session.
//! - Readers always observe the last successfully saved value.

use crate::repo::kv_repo::{KvRepository, RepoError, RepoResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Generic durable value cell bound to a named slot.
pub struct PersistedField<T> {
    slot: &'static str,
    value: T,
}

impl<T: Serialize + DeserializeOwned> PersistedField<T> {
    /// Loads the field for `slot`.
    ///
    /// An absent slot yields `initial`; a payload that fails to parse also
    /// yields `initial`, with a structured warning instead of an error.
    pub fn load<R: KvRepository>(repo: &R, slot: &'static str, initial: T) -> RepoResult<Self> {
        let value = match repo.load_slot(slot)? {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(stored) => stored,
                Err(err) => {
                    warn!("event=slot_load module=repo status=fallback slot={slot} error={err}");
                    initial
                }
            },
            None => initial,
        };
        Ok(Self { slot, value })
    }

    /// Slot key this field is bound to.
    pub fn slot(&self) -> &'static str {
        self.slot
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and writes it through.
    pub fn set<R: KvRepository>(&mut self, repo: &R, value: T) -> RepoResult<()> {
        self.value = value;
        self.save(repo)
    }

    /// Mutates the value in place, then writes it through.
    pub fn update<R: KvRepository>(
        &mut self,
        repo: &R,
        mutate: impl FnOnce(&mut T),
    ) -> RepoResult<()> {
        mutate(&mut self.value);
        self.save(repo)
    }

    fn save<R: KvRepository>(&self, repo: &R) -> RepoResult<()> {
        let payload = serde_json::to_string(&self.value).map_err(|err| {
            RepoError::InvalidData(format!("slot `{}` payload failed to encode: {err}", self.slot))
        })?;
        repo.save_slot(self.slot, &payload)
    }
}
