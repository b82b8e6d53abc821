//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep uniqueness and validation checks at the single write boundary.
//!
//! # Invariants
//! - Repository writes must run `AlarmDraft::validate()` before mutating.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateTime`).

pub mod alarm_repo;
pub mod conflict;
