//! Core domain logic for AlarmDeck.
//! This crate is the single source of truth for alarm invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::alarm::{
    Alarm, AlarmDraft, AlarmFields, AlarmId, AlarmTime, AlarmValidationError, DraftField,
    Recurrence,
};
pub use model::catalog::{AlarmCatalog, CatalogError};
pub use repo::alarm_repo::{AlarmRepository, InMemoryAlarmRepository, RepoError, RepoResult};
pub use repo::conflict::has_conflict;
pub use service::alarm_service::{AlarmService, DeleteOutcome, DELETE_PROMPT_MESSAGE};
pub use service::critical_guard::{
    disable_prompt_message, ConfirmationPrompt, CriticalAlarmGuard, ToggleOutcome,
};
pub use service::edit_session::{EditSession, SessionError, SessionState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
