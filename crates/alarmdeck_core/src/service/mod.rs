//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hold the transient UI-facing state (edit session, confirmation gate).

pub mod alarm_service;
pub mod critical_guard;
pub mod edit_session;
