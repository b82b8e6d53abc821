//! Alarm repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the canonical, creation-ordered alarm collection.
//! - Enforce commit validation and time uniqueness on every write.
//!
//! # Invariants
//! - No two stored alarms share the same `time`.
//! - Write paths validate before mutating; a failed call leaves the
//!   collection unchanged.
//! - Updates keep the alarm's position and `enabled` flag.

use crate::model::alarm::{
    Alarm, AlarmDraft, AlarmFields, AlarmId, AlarmTime, AlarmValidationError,
};
use crate::model::catalog::{AlarmCatalog, CatalogError};
use crate::repo::conflict::has_conflict;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for alarm writes and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(AlarmValidationError),
    DuplicateTime(AlarmTime),
    NotFound(AlarmId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateTime(time) => write!(
                f,
                "an alarm for {time} already exists; choose a different time"
            ),
            Self::NotFound(id) => write!(f, "alarm not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateTime(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<AlarmValidationError> for RepoError {
    fn from(value: AlarmValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for alarm CRUD operations.
pub trait AlarmRepository {
    /// Catalog used to validate drafts.
    fn catalog(&self) -> &AlarmCatalog;
    fn create_alarm(&mut self, draft: &AlarmDraft) -> RepoResult<Alarm>;
    fn update_alarm(&mut self, id: AlarmId, draft: &AlarmDraft) -> RepoResult<Alarm>;
    fn delete_alarm(&mut self, id: AlarmId) -> RepoResult<()>;
    fn set_enabled(&mut self, id: AlarmId, enabled: bool) -> RepoResult<Alarm>;
    fn get_alarm(&self, id: AlarmId) -> Option<Alarm>;
    /// Snapshot in creation order.
    fn list_alarms(&self) -> Vec<Alarm>;
}

/// Process-local alarm repository.
#[derive(Debug, Default)]
pub struct InMemoryAlarmRepository {
    catalog: AlarmCatalog,
    alarms: Vec<Alarm>,
}

impl InMemoryAlarmRepository {
    /// Creates an empty repository with the baseline catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository with a custom catalog.
    ///
    /// # Errors
    /// - Returns the catalog validation error when `catalog` is unusable.
    pub fn with_catalog(catalog: AlarmCatalog) -> Result<Self, CatalogError> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            alarms: Vec::new(),
        })
    }

    fn position(&self, id: AlarmId) -> RepoResult<usize> {
        self.alarms
            .iter()
            .position(|alarm| alarm.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    fn checked_fields(
        &self,
        draft: &AlarmDraft,
        excluding: Option<AlarmId>,
    ) -> RepoResult<AlarmFields> {
        let fields = draft.validate(&self.catalog)?;
        if has_conflict(fields.time, excluding, &self.alarms) {
            return Err(RepoError::DuplicateTime(fields.time));
        }
        Ok(fields)
    }
}

impl AlarmRepository for InMemoryAlarmRepository {
    fn catalog(&self) -> &AlarmCatalog {
        &self.catalog
    }

    fn create_alarm(&mut self, draft: &AlarmDraft) -> RepoResult<Alarm> {
        let fields = match self.checked_fields(draft, None) {
            Ok(fields) => fields,
            Err(err) => {
                warn!("event=alarm_create module=repo status=rejected error={err}");
                return Err(err);
            }
        };

        let alarm = Alarm {
            id: Uuid::new_v4(),
            time: fields.time,
            label: fields.label,
            enabled: true,
            recurrence: fields.recurrence,
            sound: fields.sound,
        };
        self.alarms.push(alarm.clone());
        info!(
            "event=alarm_create module=repo status=ok alarm_id={} time={} count={}",
            alarm.id,
            alarm.time,
            self.alarms.len()
        );
        Ok(alarm)
    }

    fn update_alarm(&mut self, id: AlarmId, draft: &AlarmDraft) -> RepoResult<Alarm> {
        let checked = self.position(id).and_then(|index| {
            self.checked_fields(draft, Some(id))
                .map(|fields| (index, fields))
        });
        let (index, fields) = match checked {
            Ok(found) => found,
            Err(err) => {
                warn!("event=alarm_update module=repo status=rejected alarm_id={id} error={err}");
                return Err(err);
            }
        };

        let alarm = &mut self.alarms[index];
        alarm.time = fields.time;
        alarm.label = fields.label;
        alarm.recurrence = fields.recurrence;
        alarm.sound = fields.sound;
        info!(
            "event=alarm_update module=repo status=ok alarm_id={} time={}",
            alarm.id, alarm.time
        );
        Ok(alarm.clone())
    }

    fn delete_alarm(&mut self, id: AlarmId) -> RepoResult<()> {
        let index = self.position(id)?;
        self.alarms.remove(index);
        info!(
            "event=alarm_delete module=repo status=ok alarm_id={id} count={}",
            self.alarms.len()
        );
        Ok(())
    }

    fn set_enabled(&mut self, id: AlarmId, enabled: bool) -> RepoResult<Alarm> {
        let index = self.position(id)?;
        let alarm = &mut self.alarms[index];
        alarm.enabled = enabled;
        info!("event=alarm_set_enabled module=repo status=ok alarm_id={id} enabled={enabled}");
        Ok(alarm.clone())
    }

    fn get_alarm(&self, id: AlarmId) -> Option<Alarm> {
        self.alarms.iter().find(|alarm| alarm.id == id).cloned()
    }

    fn list_alarms(&self) -> Vec<Alarm> {
        self.alarms.clone()
    }
}
