//! Persistence boundary for the focus core.
//!
//! # Responsibility
//! - Define the key-value slot contract and its SQLite implementation.
//! - Provide the durable value cell built on top of it.
//!
//! # Invariants
//! - Each slot is mutated only by its owning field; no component reaches
//!   into another component's slot.

pub mod kv_repo;
pub mod persisted;
