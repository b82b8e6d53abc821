//! Alarm domain model.
//!
//! # Responsibility
//! - Define the canonical alarm record and its editable draft shape.
//! - Parse and validate form input before it reaches the repository.
//!
//! # Invariants
//! - `id` is stable and never reused for another alarm.
//! - A committed alarm always has a non-blank `label` and a parsed `time`.
//! - `sound` always holds the catalog spelling once committed.
//!
//! # See also
//! - crate::model::catalog

use crate::model::catalog::{AlarmCatalog, DEFAULT_SOUNDS};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one alarm.
pub type AlarmId = Uuid;

/// Label used by a freshly opened add form.
pub const DEFAULT_DRAFT_LABEL: &str = "New Alarm";
/// Time used by a freshly opened add form.
pub const DEFAULT_DRAFT_TIME: &str = "08:00";

/// `chrono` format for alarm times on the form and the wire.
const TIME_FORMAT: &str = "%H:%M";

/// Wall-clock time of day with minute resolution.
///
/// Serialized as a zero-padded `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlarmTime(NaiveTime);

impl AlarmTime {
    /// Builds a time from hour (0-23) and minute (0-59).
    pub fn new(hour: u8, minute: u8) -> Result<Self, AlarmValidationError> {
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
            .map(Self)
            .ok_or_else(|| AlarmValidationError::InvalidTime(format!("{hour}:{minute:02}")))
    }

    /// Parses `H:MM` or `HH:MM` form input.
    ///
    /// Surrounding whitespace is ignored; blank input is reported as
    /// `EmptyTime` so callers can tell a cleared field from a typo.
    pub fn parse(value: &str) -> Result<Self, AlarmValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AlarmValidationError::EmptyTime);
        }

        NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
            .map(Self)
            .map_err(|_| AlarmValidationError::InvalidTime(trimmed.to_string()))
    }

    pub fn hour(self) -> u8 {
        // NaiveTime keeps hour < 24 and minute < 60.
        self.0.hour() as u8
    }

    pub fn minute(self) -> u8 {
        self.0.minute() as u8
    }
}

impl Display for AlarmTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AlarmTime {
    type Error = AlarmValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<AlarmTime> for String {
    fn from(value: AlarmTime) -> Self {
        value.to_string()
    }
}

/// How often an alarm repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recurrence {
    Once,
    Daily,
    Weekdays,
    Weekends,
}

impl Recurrence {
    /// All recurrence values in display order.
    pub const ALL: [Recurrence; 4] = [
        Recurrence::Once,
        Recurrence::Daily,
        Recurrence::Weekdays,
        Recurrence::Weekends,
    ];

    /// Stable display/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "Once",
            Self::Daily => "Daily",
            Self::Weekdays => "Weekdays",
            Self::Weekends => "Weekends",
        }
    }

    /// Parses a recurrence name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical alarm record owned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: AlarmId,
    pub time: AlarmTime,
    pub label: String,
    pub enabled: bool,
    pub recurrence: Recurrence,
    pub sound: String,
}

impl Alarm {
    /// Snapshot of the editable fields, used to open an edit form.
    pub fn to_draft(&self) -> AlarmDraft {
        AlarmDraft {
            time: self.time.to_string(),
            label: self.label.clone(),
            recurrence: self.recurrence,
            sound: self.sound.clone(),
        }
    }
}

/// Editable alarm fields as typed into an add/edit form.
///
/// `time` stays raw text so a cleared input can be represented; parsing
/// happens on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmDraft {
    pub time: String,
    pub label: String,
    pub recurrence: Recurrence,
    pub sound: String,
}

impl Default for AlarmDraft {
    fn default() -> Self {
        Self {
            time: DEFAULT_DRAFT_TIME.to_string(),
            label: DEFAULT_DRAFT_LABEL.to_string(),
            recurrence: Recurrence::Once,
            sound: DEFAULT_SOUNDS[0].to_string(),
        }
    }
}

impl AlarmDraft {
    /// Creates a draft with the given time and label and default options.
    pub fn new(time: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    /// Writes one form field.
    ///
    /// The draft is left untouched when `value` cannot be applied.
    pub fn set_field(
        &mut self,
        field: DraftField,
        value: &str,
    ) -> Result<(), AlarmValidationError> {
        match field {
            DraftField::Time => self.time = value.to_string(),
            DraftField::Label => self.label = value.to_string(),
            DraftField::Recurrence => {
                self.recurrence = Recurrence::parse(value)
                    .ok_or_else(|| AlarmValidationError::UnknownRecurrence(value.to_string()))?;
            }
            DraftField::Sound => self.sound = value.to_string(),
        }
        Ok(())
    }

    /// Validates the draft against commit rules and the configured catalog.
    ///
    /// # Errors
    /// - `EmptyTime` / `EmptyLabel` for blank required fields. A non-blank
    ///   label is stored exactly as typed.
    /// - `InvalidTime` when `time` is not `HH:MM`.
    /// - `UnsupportedRecurrence` / `UnknownSound` for values outside the catalog.
    pub fn validate(&self, catalog: &AlarmCatalog) -> Result<AlarmFields, AlarmValidationError> {
        if self.time.trim().is_empty() {
            return Err(AlarmValidationError::EmptyTime);
        }
        if self.label.trim().is_empty() {
            return Err(AlarmValidationError::EmptyLabel);
        }

        let time = AlarmTime::parse(self.time.as_str())?;
        if !catalog.supports_recurrence(self.recurrence) {
            return Err(AlarmValidationError::UnsupportedRecurrence(self.recurrence));
        }
        let sound = catalog
            .canonical_sound(self.sound.as_str())
            .ok_or_else(|| AlarmValidationError::UnknownSound(self.sound.clone()))?;

        Ok(AlarmFields {
            time,
            label: self.label.clone(),
            recurrence: self.recurrence,
            sound: sound.to_string(),
        })
    }
}

/// Validated editable fields, ready to be written to an alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmFields {
    pub time: AlarmTime,
    pub label: String,
    pub recurrence: Recurrence,
    pub sound: String,
}

/// Form field names accepted by draft updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Time,
    Label,
    Recurrence,
    Sound,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Label => "label",
            Self::Recurrence => "recurrence",
            Self::Sound => "sound",
        }
    }

    /// Parses a form field name (`time|label|recurrence|sound`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "time" => Some(Self::Time),
            "label" => Some(Self::Label),
            "recurrence" => Some(Self::Recurrence),
            "sound" => Some(Self::Sound),
            _ => None,
        }
    }
}

/// Validation failures for alarm input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmValidationError {
    EmptyTime,
    EmptyLabel,
    InvalidTime(String),
    UnknownRecurrence(String),
    UnsupportedRecurrence(Recurrence),
    UnknownSound(String),
}

impl Display for AlarmValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTime => write!(f, "alarm time must not be empty"),
            Self::EmptyLabel => write!(f, "alarm label must not be empty"),
            Self::InvalidTime(value) => {
                write!(f, "alarm time must be HH:MM, got `{value}`")
            }
            Self::UnknownRecurrence(value) => write!(f, "unknown recurrence `{value}`"),
            Self::UnsupportedRecurrence(value) => {
                write!(f, "recurrence `{value}` is not offered by the catalog")
            }
            Self::UnknownSound(value) => write!(f, "unknown alarm sound `{value}`"),
        }
    }
}

impl Error for AlarmValidationError {}
