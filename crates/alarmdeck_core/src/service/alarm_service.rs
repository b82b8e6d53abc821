//! Alarm use-case service.
//!
//! # Responsibility
//! - Map UI intents 1:1 onto session, guard and repository operations.
//! - Keep the edit session consistent with repository deletions.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or the critical gate.
//! - The service is the single owner of both repository and session.

use crate::model::alarm::{Alarm, AlarmDraft, AlarmId, Recurrence};
use crate::model::catalog::{AlarmCatalog, CatalogError};
use crate::repo::alarm_repo::{AlarmRepository, RepoError, RepoResult};
use crate::service::critical_guard::{ConfirmationPrompt, CriticalAlarmGuard, ToggleOutcome};
use crate::service::edit_session::{EditSession, SessionError, SessionState};
use log::info;

/// Question shown before an alarm is deleted.
pub const DELETE_PROMPT_MESSAGE: &str = "Are you sure you want to delete this alarm?";

/// Result of a confirmed-or-declined delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Alarm removed; `closed_edit` reports whether its edit form was open.
    Deleted { closed_edit: bool },
    /// The user declined; nothing changed.
    Declined,
}

/// Controller-facing facade over one repository and one edit session.
pub struct AlarmService<R: AlarmRepository> {
    repo: R,
    session: EditSession,
    guard: CriticalAlarmGuard,
}

impl<R: AlarmRepository> AlarmService<R> {
    /// Creates a service using the provided repository implementation.
    ///
    /// The critical keywords and add-form defaults come from the
    /// repository's catalog.
    pub fn new(repo: R) -> Result<Self, CatalogError> {
        let guard = CriticalAlarmGuard::from_catalog(repo.catalog())?;
        let session = EditSession::with_default_draft(repo.catalog().default_draft());
        Ok(Self {
            repo,
            session,
            guard,
        })
    }

    /// Adds the two starter alarms shown on first launch.
    ///
    /// `07:00 Wake Up` is enabled; `12:30 Lunch Meeting` is created disabled.
    pub fn seed_sample_alarms(&mut self) -> RepoResult<Vec<Alarm>> {
        let wake_up = self.repo.create_alarm(
            &AlarmDraft::new("07:00", "Wake Up")
                .with_recurrence(Recurrence::Weekdays)
                .with_sound("Radar"),
        )?;
        let lunch = self.repo.create_alarm(
            &AlarmDraft::new("12:30", "Lunch Meeting")
                .with_recurrence(Recurrence::Once)
                .with_sound("Chimes"),
        )?;
        let lunch = self.repo.set_enabled(lunch.id, false)?;
        Ok(vec![wake_up, lunch])
    }

    /// Current alarms in creation order.
    pub fn alarms(&self) -> Vec<Alarm> {
        self.repo.list_alarms()
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    pub fn catalog(&self) -> &AlarmCatalog {
        self.repo.catalog()
    }

    pub fn guard(&self) -> &CriticalAlarmGuard {
        &self.guard
    }

    /// Flips alarm `id`, asking `prompt` first when disabling a critical alarm.
    pub fn request_toggle<P>(&mut self, id: AlarmId, prompt: &mut P) -> RepoResult<ToggleOutcome>
    where
        P: ConfirmationPrompt + ?Sized,
    {
        self.guard.toggle(&mut self.repo, id, prompt)
    }

    /// Deletes alarm `id` once `prompt` confirms.
    ///
    /// Closes the edit form when it targeted the deleted alarm.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when `id` is absent; the prompt is not shown.
    pub fn request_delete<P>(&mut self, id: AlarmId, prompt: &mut P) -> RepoResult<DeleteOutcome>
    where
        P: ConfirmationPrompt + ?Sized,
    {
        if self.repo.get_alarm(id).is_none() {
            return Err(RepoError::NotFound(id));
        }
        if !prompt.confirm(DELETE_PROMPT_MESSAGE) {
            info!("event=alarm_delete module=service status=declined alarm_id={id}");
            return Ok(DeleteOutcome::Declined);
        }

        self.repo.delete_alarm(id)?;
        let closed_edit = self.session.on_alarm_deleted(id);
        Ok(DeleteOutcome::Deleted { closed_edit })
    }

    /// Opens the edit form for alarm `id`.
    pub fn request_start_edit(&mut self, id: AlarmId) -> RepoResult<()> {
        let alarm = self.repo.get_alarm(id).ok_or(RepoError::NotFound(id))?;
        self.session.start_edit(&alarm);
        Ok(())
    }

    /// Opens the add form.
    pub fn request_start_add(&mut self) {
        self.session.start_add();
    }

    /// Writes one field of the open form.
    pub fn request_field_change(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        self.session.update_draft_field(name, value)
    }

    /// Saves the open form.
    pub fn request_commit(&mut self) -> Result<Alarm, SessionError> {
        self.session.commit(&mut self.repo)
    }

    /// Closes the open form without saving.
    pub fn request_cancel(&mut self) {
        self.session.cancel();
    }
}
