//! Fixed option catalogs supplied to the core at construction.
//!
//! # Responsibility
//! - Hold the recurrence options, sound names and critical keywords.
//! - Load alternate catalogs from JSON configuration.
//!
//! # Invariants
//! - A valid catalog offers at least one recurrence and one sound.
//! - Sound names are unique ignoring case; entries are never blank.

use crate::model::alarm::{AlarmDraft, Recurrence};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Baseline alarm sounds.
pub const DEFAULT_SOUNDS: &[&str] = &["Radar", "Chimes", "Signal", "Waves", "Sonar"];
/// Baseline keywords marking an alarm as critical.
pub const DEFAULT_CRITICAL_KEYWORDS: &[&str] = &["wake up", "meeting"];

/// Immutable option catalogs for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmCatalog {
    pub recurrences: Vec<Recurrence>,
    pub sounds: Vec<String>,
    pub critical_keywords: Vec<String>,
}

impl Default for AlarmCatalog {
    fn default() -> Self {
        Self {
            recurrences: Recurrence::ALL.to_vec(),
            sounds: DEFAULT_SOUNDS.iter().map(|value| value.to_string()).collect(),
            critical_keywords: DEFAULT_CRITICAL_KEYWORDS
                .iter()
                .map(|value| value.to_string())
                .collect(),
        }
    }
}

impl AlarmCatalog {
    /// Parses and validates a JSON catalog.
    ///
    /// Missing keys fall back to the baseline values.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json).map_err(CatalogError::Json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks catalog invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.recurrences.is_empty() {
            return Err(CatalogError::EmptyRecurrences);
        }
        if self.sounds.is_empty() {
            return Err(CatalogError::EmptySounds);
        }
        for (index, sound) in self.sounds.iter().enumerate() {
            if sound.trim().is_empty() {
                return Err(CatalogError::BlankEntry("sounds"));
            }
            if self.sounds[..index]
                .iter()
                .any(|earlier| earlier.eq_ignore_ascii_case(sound))
            {
                return Err(CatalogError::DuplicateSound(sound.clone()));
            }
        }
        if self
            .critical_keywords
            .iter()
            .any(|keyword| keyword.trim().is_empty())
        {
            return Err(CatalogError::BlankEntry("critical_keywords"));
        }
        Ok(())
    }

    /// Whether the recurrence is offered by this catalog.
    pub fn supports_recurrence(&self, recurrence: Recurrence) -> bool {
        self.recurrences.contains(&recurrence)
    }

    /// Returns the catalog spelling of `value`, matched ignoring case.
    pub fn canonical_sound(&self, value: &str) -> Option<&str> {
        let normalized = value.trim();
        self.sounds
            .iter()
            .find(|sound| sound.eq_ignore_ascii_case(normalized))
            .map(String::as_str)
    }

    /// Draft used when an add form opens.
    ///
    /// Keeps the baseline `Once`/first-sound defaults unless the catalog
    /// does not offer them.
    pub fn default_draft(&self) -> AlarmDraft {
        let mut draft = AlarmDraft::default();
        if !self.supports_recurrence(draft.recurrence) {
            if let Some(first) = self.recurrences.first() {
                draft.recurrence = *first;
            }
        }
        if self.canonical_sound(draft.sound.as_str()).is_none() {
            if let Some(first) = self.sounds.first() {
                draft.sound = first.clone();
            }
        }
        draft
    }
}

/// Catalog configuration errors.
#[derive(Debug)]
pub enum CatalogError {
    Json(serde_json::Error),
    EmptyRecurrences,
    EmptySounds,
    BlankEntry(&'static str),
    DuplicateSound(String),
    InvalidKeywords(regex::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid catalog json: {err}"),
            Self::EmptyRecurrences => write!(f, "catalog must offer at least one recurrence"),
            Self::EmptySounds => write!(f, "catalog must offer at least one sound"),
            Self::BlankEntry(field) => write!(f, "catalog `{field}` contains a blank entry"),
            Self::DuplicateSound(value) => write!(f, "catalog sound is duplicated: {value}"),
            Self::InvalidKeywords(err) => write!(f, "critical keywords cannot be compiled: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidKeywords(err) => Some(err),
            _ => None,
        }
    }
}
