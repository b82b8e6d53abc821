//! Single-slot add/edit session.
//!
//! # Responsibility
//! - Track at most one in-progress draft, either a new alarm or an edit.
//! - Commit drafts through the repository and report structured errors.
//!
//! # Invariants
//! - Adding and editing are mutually exclusive; opening one closes the other.
//! - A rejected commit keeps the state and the draft exactly as they were.
//! - Deleting the alarm under edit returns the session to `Idle`.

use crate::model::alarm::{Alarm, AlarmDraft, AlarmId, AlarmValidationError, DraftField};
use crate::repo::alarm_repo::{AlarmRepository, RepoError};
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current add/edit form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Browsing; no form open.
    Idle,
    /// Add form open with its draft.
    Adding { draft: AlarmDraft },
    /// Edit form open for `alarm_id`.
    Editing { alarm_id: AlarmId, draft: AlarmDraft },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Adding { .. } => "adding",
            Self::Editing { .. } => "editing",
        }
    }
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation needs an open add/edit form.
    NoActiveDraft,
    /// Field name is not one of `time|label|recurrence|sound`.
    UnknownField(String),
    /// Field value cannot be stored in the draft.
    InvalidFieldValue(AlarmValidationError),
    /// Commit was rejected by the repository.
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveDraft => write!(f, "no alarm is being added or edited"),
            Self::UnknownField(name) => write!(f, "unknown alarm field `{name}`"),
            Self::InvalidFieldValue(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFieldValue(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Add/edit state machine with a configurable add-form template.
#[derive(Debug, Clone)]
pub struct EditSession {
    state: SessionState,
    default_draft: AlarmDraft,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Creates an idle session using `AlarmDraft::default()` for new alarms.
    pub fn new() -> Self {
        Self::with_default_draft(AlarmDraft::default())
    }

    /// Creates an idle session whose add form starts from `default_draft`.
    pub fn with_default_draft(default_draft: AlarmDraft) -> Self {
        Self {
            state: SessionState::Idle,
            default_draft,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    /// Draft of the open form, if any.
    pub fn draft(&self) -> Option<&AlarmDraft> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Adding { draft } | SessionState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Alarm currently under edit, if any.
    pub fn editing_id(&self) -> Option<AlarmId> {
        match &self.state {
            SessionState::Editing { alarm_id, .. } => Some(*alarm_id),
            _ => None,
        }
    }

    /// Opens the add form with a fresh draft.
    ///
    /// Discards an open edit. An add form that is already open keeps its
    /// draft.
    pub fn start_add(&mut self) {
        if matches!(self.state, SessionState::Adding { .. }) {
            return;
        }
        self.transition(SessionState::Adding {
            draft: self.default_draft.clone(),
        });
    }

    /// Opens the edit form for `alarm`, closing any other open form.
    pub fn start_edit(&mut self, alarm: &Alarm) {
        self.transition(SessionState::Editing {
            alarm_id: alarm.id,
            draft: alarm.to_draft(),
        });
    }

    /// Writes one field of the open draft, addressed by form field name.
    pub fn update_draft_field(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        let field =
            DraftField::parse(name).ok_or_else(|| SessionError::UnknownField(name.to_string()))?;
        self.set_draft_field(field, value)
    }

    /// Writes one field of the open draft.
    ///
    /// # Errors
    /// - `NoActiveDraft` when idle.
    /// - `InvalidFieldValue` when the value cannot be stored; the draft is unchanged.
    pub fn set_draft_field(&mut self, field: DraftField, value: &str) -> Result<(), SessionError> {
        let draft = match &mut self.state {
            SessionState::Idle => return Err(SessionError::NoActiveDraft),
            SessionState::Adding { draft } | SessionState::Editing { draft, .. } => draft,
        };
        draft
            .set_field(field, value)
            .map_err(SessionError::InvalidFieldValue)
    }

    /// Closes any open form, discarding its draft.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            self.transition(SessionState::Idle);
        }
    }

    /// Commits the open draft: create when adding, update when editing.
    ///
    /// # Errors
    /// - `NoActiveDraft` when idle.
    /// - `Repo(Validation | DuplicateTime)` leaves state and draft untouched.
    /// - `Repo(NotFound)` when the edited alarm vanished; the session closes.
    pub fn commit<R>(&mut self, repo: &mut R) -> Result<Alarm, SessionError>
    where
        R: AlarmRepository + ?Sized,
    {
        let result = match &self.state {
            SessionState::Idle => return Err(SessionError::NoActiveDraft),
            SessionState::Adding { draft } => repo.create_alarm(draft),
            SessionState::Editing { alarm_id, draft } => repo.update_alarm(*alarm_id, draft),
        };

        match result {
            Ok(alarm) => {
                info!(
                    "event=session_commit module=session status=ok from={} alarm_id={}",
                    self.state.name(),
                    alarm.id
                );
                self.transition(SessionState::Idle);
                Ok(alarm)
            }
            Err(err) => {
                info!(
                    "event=session_commit module=session status=rejected from={} error={err}",
                    self.state.name()
                );
                if matches!(err, RepoError::NotFound(_)) {
                    self.transition(SessionState::Idle);
                }
                Err(err.into())
            }
        }
    }

    /// Reacts to an alarm removal; closes the edit form if it targeted `id`.
    ///
    /// Returns `true` when the session was closed.
    pub fn on_alarm_deleted(&mut self, id: AlarmId) -> bool {
        if self.editing_id() == Some(id) {
            self.transition(SessionState::Idle);
            return true;
        }
        false
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            "event=session_transition module=session from={} to={}",
            self.state.name(),
            next.name()
        );
        self.state = next;
    }
}
