//! Command-based control for the sunlamp controller.

use crate::controller::IdlePolicy;
use crate::schedule::ScheduleTable;

/// Actions an external configuration collaborator can apply between ticks.
///
/// A serial or network editor builds one of these and hands it to
/// [`SunlampController::handle_action`](crate::SunlampController::handle_action)
/// outside of a service call; the table is never edited in place under a
/// live evaluation.
#[derive(Debug, Clone)]
pub enum ControllerAction<const N: usize> {
    /// Replace the schedule table wholesale.
    ReplaceTable(ScheduleTable<N>),
    /// Remove all schedules.
    ClearTable,
    /// Change the idle policy.
    SetIdlePolicy(IdlePolicy),
}
