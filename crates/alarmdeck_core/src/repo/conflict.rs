//! Time-collision check shared by create and update paths.

use crate::model::alarm::{Alarm, AlarmId, AlarmTime};

/// Returns `true` when an alarm other than `excluding` already uses
/// `candidate`.
///
/// Create passes `excluding = None`; update passes the alarm being edited so
/// it does not collide with itself.
pub fn has_conflict(candidate: AlarmTime, excluding: Option<AlarmId>, alarms: &[Alarm]) -> bool {
    alarms
        .iter()
        .any(|alarm| alarm.time == candidate && Some(alarm.id) != excluding)
}
