//! Confirmation gate for disabling critical alarms.
//!
//! # Responsibility
//! - Classify alarms as critical from their label.
//! - Ask an injected prompt before a critical alarm is switched off.
//!
//! # Invariants
//! - Only `enabled: true -> false` on a critical alarm ever prompts.
//! - A declined prompt leaves the repository untouched.

use crate::model::alarm::{Alarm, AlarmId};
use crate::model::catalog::{AlarmCatalog, CatalogError};
use crate::repo::alarm_repo::{AlarmRepository, RepoError, RepoResult};
use log::info;
use regex::{Regex, RegexBuilder};

/// Synchronous yes/no decision supplied by the UI layer.
pub trait ConfirmationPrompt {
    /// Returns `true` only for an explicit affirmative answer.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmationPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Result of a gated enable/disable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The new state was written.
    Applied(Alarm),
    /// The user declined; nothing changed.
    Declined,
}

/// Keyword policy deciding which alarms need confirmation to disable.
#[derive(Debug, Clone)]
pub struct CriticalAlarmGuard {
    matcher: Option<Regex>,
}

impl CriticalAlarmGuard {
    /// Builds a guard matching any keyword as a case-insensitive substring.
    ///
    /// Blank keywords are ignored; an empty list marks no alarm as critical.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, CatalogError> {
        let escaped = keywords
            .iter()
            .map(|keyword| keyword.as_ref().trim())
            .filter(|keyword| !keyword.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>();
        if escaped.is_empty() {
            return Ok(Self { matcher: None });
        }

        let pattern = escaped.join("|");
        let matcher = RegexBuilder::new(pattern.as_str())
            .case_insensitive(true)
            .build()
            .map_err(CatalogError::InvalidKeywords)?;
        Ok(Self {
            matcher: Some(matcher),
        })
    }

    /// Builds a guard from the catalog's `critical_keywords`.
    pub fn from_catalog(catalog: &AlarmCatalog) -> Result<Self, CatalogError> {
        Self::new(catalog.critical_keywords.as_slice())
    }

    pub fn is_critical(&self, label: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(label))
    }

    /// Whether moving `alarm` to `enabled` must be confirmed first.
    pub fn requires_confirmation(&self, alarm: &Alarm, enabled: bool) -> bool {
        alarm.enabled && !enabled && self.is_critical(alarm.label.as_str())
    }

    /// Applies `enabled` to alarm `id`, prompting first when required.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when `id` is absent; the prompt is not shown.
    pub fn set_enabled<R, P>(
        &self,
        repo: &mut R,
        id: AlarmId,
        enabled: bool,
        prompt: &mut P,
    ) -> RepoResult<ToggleOutcome>
    where
        R: AlarmRepository + ?Sized,
        P: ConfirmationPrompt + ?Sized,
    {
        let alarm = repo.get_alarm(id).ok_or(RepoError::NotFound(id))?;
        if self.requires_confirmation(&alarm, enabled)
            && !prompt.confirm(disable_prompt_message(alarm.label.as_str()).as_str())
        {
            info!("event=alarm_disable module=guard status=declined alarm_id={id}");
            return Ok(ToggleOutcome::Declined);
        }

        repo.set_enabled(id, enabled).map(ToggleOutcome::Applied)
    }

    /// Flips the enabled flag of alarm `id` through the gate.
    pub fn toggle<R, P>(
        &self,
        repo: &mut R,
        id: AlarmId,
        prompt: &mut P,
    ) -> RepoResult<ToggleOutcome>
    where
        R: AlarmRepository + ?Sized,
        P: ConfirmationPrompt + ?Sized,
    {
        let current = repo.get_alarm(id).ok_or(RepoError::NotFound(id))?;
        self.set_enabled(repo, id, !current.enabled, prompt)
    }
}

/// Question shown before a critical alarm is disabled.
pub fn disable_prompt_message(label: &str) -> String {
    format!("This seems like a critical alarm. Are you sure you want to disable \"{label}\"?")
}
