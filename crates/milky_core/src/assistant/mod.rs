//! Local assistant query boundary.
//!
//! # Responsibility
//! - Bridge the focus core to a locally hosted inference endpoint.
//!
//! # Invariants
//! - A broken backend degrades to a fixed offline reply; it never blocks
//!   task or timer functionality.

pub mod client;

pub use client::{AssistantClient, AssistantConfig, OFFLINE_FALLBACK};
