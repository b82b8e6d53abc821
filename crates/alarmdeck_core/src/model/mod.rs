//! Alarm domain model and option catalogs.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep form parsing rules next to the types they produce.
//!
//! # Invariants
//! - Every alarm is identified by a stable `AlarmId`.
//! - Catalogs are immutable once handed to a repository.

pub mod alarm;
pub mod catalog;
