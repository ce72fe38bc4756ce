//! Identifier and clock primitives.
//!
//! # Responsibility
//! - Generate collision-resistant identifiers for entities created in rapid
//!   succession.
//! - Provide the epoch-millisecond clock used for history timestamps.
//!
//! # Invariants
//! - Two identifiers drawn within the same millisecond never collide.
//! - An identifier handed out once is never reused for another entity.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable opaque identifier for tasks, log entries and history records.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// Draws a fresh identifier.
///
/// UUID v7 embeds a millisecond timestamp and fills the remaining bits with
/// randomness, so two entities created inside the same tick still get
/// distinct ids. A bare wall-clock value is not enough here.
pub fn fresh_id() -> EntryId {
    Uuid::now_v7()
}

/// Parses an identifier from its canonical string form.
pub fn parse_entry_id(value: &str) -> Option<EntryId> {
    Uuid::parse_str(value.trim()).ok()
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{epoch_ms_now, fresh_id, parse_entry_id};
    use std::collections::HashSet;

    #[test]
    fn rapid_ids_never_collide() {
        let ids: HashSet<_> = (0..1000).map(|_| fresh_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn parse_roundtrips_canonical_form() {
        let id = fresh_id();
        assert_eq!(parse_entry_id(&id.to_string()), Some(id));
        assert_eq!(parse_entry_id(&format!("  {id}  ")), Some(id));
        assert_eq!(parse_entry_id("not-an-id"), None);
    }

    #[test]
    fn epoch_clock_is_past_2020() {
        assert!(epoch_ms_now() > 1_577_836_800_000);
    }
}
