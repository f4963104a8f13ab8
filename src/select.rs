//! Governing-alarm selection.
//!
//! Given a schedule table and a wall-clock reading, selection answers one
//! question: which alarm, if any, is currently determining the lamp's
//! target ("governing alarm"). An alarm governs from its trigger time until
//! a later alarm triggers on the same day.

use crate::schedule::ScheduleTable;
use crate::types::WallTime;

/// Returns the index of the alarm governing the lamp at `now`, if any.
///
/// Candidates are enabled entries whose day set contains the current
/// weekday, whose trigger time is well-formed, and whose trigger is not
/// after the current time of day. Among candidates the latest trigger
/// wins; identical triggers resolve to the lowest table index, so the
/// result is deterministic across calls.
///
/// Returns `None` when no candidate has triggered yet today; the
/// controller's idle policy decides what the ramp does then.
pub fn governing_alarm<const N: usize>(table: &ScheduleTable<N>, now: WallTime) -> Option<usize> {
    let now_minutes = now.minutes_of_day();
    let mut best: Option<(usize, u16)> = None;

    for (index, alarm) in table.iter().enumerate() {
        if !alarm.enabled || !alarm.days.contains(now.weekday) || !alarm.has_valid_time() {
            continue;
        }

        let trigger = alarm.trigger_minutes();
        if trigger > now_minutes {
            continue;
        }

        match best {
            // Equal triggers keep the earlier index
            Some((_, best_trigger)) if trigger <= best_trigger => {}
            _ => best = Some((index, trigger)),
        }
    }

    best.map(|(index, _)| index)
}
