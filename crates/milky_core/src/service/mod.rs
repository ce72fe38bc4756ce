//! Use-case services for the focus core.
//!
//! # Responsibility
//! - Expose the consumer-facing state operations over the persistence
//!   boundary.

pub mod focus_store;
