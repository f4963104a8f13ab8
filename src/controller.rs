//! Sunlamp controller with schedule evaluation and ramp coordination.
//!
//! Provides [`SunlampController`] which drives a single dimmable lamp from
//! a weekly schedule table, handling governing-alarm selection, ramp
//! retargeting and lamp updates. Also defines the [`Lamp`] trait for
//! hardware abstraction.

use crate::BRIGHTNESS_OFF;
use crate::command::ControllerAction;
use crate::persist::{self, PersistError};
use crate::ramp::DimRamp;
use crate::schedule::ScheduleTable;
use crate::select;
use crate::time::{MonotonicClock, WallClock};
use crate::types::AlarmSchedule;

/// Trait for abstracting the dimmable lamp output.
///
/// Implement this for your output stage (PWM, DAC, mains dimmer, etc.) to
/// let the controller drive it.
pub trait Lamp {
    /// Sets the lamp to the specified brightness.
    ///
    /// Brightness is in the range 0.0-255.0. Implementations should convert
    /// this to their hardware's native format (e.g., a PWM duty cycle).
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_brightness(&mut self, brightness: f32);
}

/// Behavior while no alarm governs the lamp.
///
/// Applies whenever selection yields nothing: before the first trigger of
/// the day, and whenever the table is empty. The active policy is exposed
/// through [`SunlampController::idle_policy`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdlePolicy {
    /// Keep pursuing (or holding) the last target. Across midnight this
    /// preserves the previous day's outcome without rescanning history.
    HoldLastTarget,
    /// Ramp to a fixed idle brightness.
    RampToIdle {
        /// Idle brightness level.
        level: u8,
        /// Ramp rate toward the idle level, in brightness units per second.
        rate: f32,
    },
}

/// Drives a single dimmable lamp through weekly brightness schedules.
///
/// The controller owns the lamp and the schedule table, borrows the clock,
/// and caches the governing-alarm reference between service calls. One
/// [`service`](SunlampController::service) call per main-loop iteration
/// performs a complete evaluation: select, retarget on change, advance the
/// ramp, push to the lamp. No allocation, no blocking, bounded time.
///
/// Schedule mutation is wholesale and must happen between service calls;
/// see [`replace_table`](SunlampController::replace_table) and the
/// [`ControllerAction`] seam for external configuration collaborators.
///
/// # Type Parameters
/// * `'c` - Lifetime of the clock reference
/// * `C` - Clock implementation providing wall and monotonic time
/// * `L` - Lamp implementation type
/// * `N` - Maximum number of alarms in the schedule table
pub struct SunlampController<'c, C, L, const N: usize>
where
    C: WallClock + MonotonicClock,
    L: Lamp,
{
    lamp: L,
    clock: &'c C,
    table: ScheduleTable<N>,
    ramp: DimRamp,
    governing: Option<usize>,
    idle_policy: IdlePolicy,
    needs_retarget: bool,
    current_brightness: f32,
}

impl<'c, C, L, const N: usize> SunlampController<'c, C, L, N>
where
    C: WallClock + MonotonicClock,
    L: Lamp,
{
    /// Creates a controller with an empty schedule table and the lamp off.
    pub fn new(mut lamp: L, clock: &'c C, idle_policy: IdlePolicy) -> Self {
        lamp.set_brightness(BRIGHTNESS_OFF);
        let ramp = DimRamp::new(clock.now_ms());

        Self {
            lamp,
            clock,
            table: ScheduleTable::new(),
            ramp,
            governing: None,
            idle_policy,
            needs_retarget: true,
            current_brightness: BRIGHTNESS_OFF,
        }
    }

    /// Runs one evaluation tick and returns the resulting brightness.
    ///
    /// Selects the governing alarm for the current wall time; when it
    /// changed since the previous call (or the table or policy were
    /// replaced), the ramp is pointed at the new target and rate - the
    /// live brightness is never reset, so transitions stay continuous.
    /// The ramp then advances by the elapsed monotonic time and the lamp
    /// is updated if the value changed.
    pub fn service(&mut self) -> f32 {
        let wall = self.clock.wall_time();
        let governing = select::governing_alarm(&self.table, wall);

        if governing != self.governing || self.needs_retarget {
            self.governing = governing;
            self.needs_retarget = false;

            match governing.and_then(|index| self.table.get(index)) {
                Some(alarm) => self.ramp.retarget(alarm.target, alarm.rate),
                None => match self.idle_policy {
                    IdlePolicy::HoldLastTarget => {}
                    IdlePolicy::RampToIdle { level, rate } => self.ramp.retarget(level, rate),
                },
            }
        }

        let brightness = self.ramp.tick(self.clock.now_ms());
        if brightness != self.current_brightness {
            self.lamp.set_brightness(brightness);
            self.current_brightness = brightness;
        }
        brightness
    }

    /// Handles a controller action by dispatching to the matching method.
    ///
    /// This is the seam through which an external configuration
    /// collaborator (serial console, network endpoint) applies changes
    /// between ticks.
    pub fn handle_action(&mut self, action: ControllerAction<N>) {
        match action {
            ControllerAction::ReplaceTable(table) => self.replace_table(table),
            ControllerAction::ClearTable => self.clear_table(),
            ControllerAction::SetIdlePolicy(policy) => self.set_idle_policy(policy),
        }
    }

    /// Replaces the schedule table wholesale.
    ///
    /// Invalidates the cached governing reference; the next service call
    /// re-selects against the new table. The live brightness is untouched.
    pub fn replace_table(&mut self, table: ScheduleTable<N>) {
        self.table = table;
        self.governing = None;
        self.needs_retarget = true;
    }

    /// Removes all schedules.
    pub fn clear_table(&mut self) {
        self.replace_table(ScheduleTable::new());
    }

    /// Hydrates the schedule table from a persisted block.
    ///
    /// On success returns the number of schedules restored. On any decode
    /// failure the table is replaced with an empty one and the error is
    /// handed back for diagnostics; the lamp keeps operating either way.
    pub fn restore(&mut self, block: &[u8]) -> Result<usize, PersistError> {
        match persist::decode(block) {
            Ok(table) => {
                let count = table.len();
                self.replace_table(table);
                Ok(count)
            }
            Err(error) => {
                self.clear_table();
                Err(error)
            }
        }
    }

    /// Encodes the current schedule table into `buffer`.
    ///
    /// Returns the block length on success; the block round-trips exactly
    /// through [`restore`](SunlampController::restore).
    pub fn persist(&self, buffer: &mut [u8]) -> Result<usize, PersistError> {
        persist::encode(&self.table, buffer)
    }

    /// Changes the idle policy. Takes effect on the next service call.
    pub fn set_idle_policy(&mut self, policy: IdlePolicy) {
        self.idle_policy = policy;
        self.needs_retarget = true;
    }

    /// The active idle policy.
    pub fn idle_policy(&self) -> IdlePolicy {
        self.idle_policy
    }

    /// The brightness most recently pushed to the lamp.
    pub fn brightness(&self) -> f32 {
        self.current_brightness
    }

    /// Index of the governing alarm as of the last service call.
    pub fn governing_index(&self) -> Option<usize> {
        self.governing
    }

    /// The governing alarm as of the last service call.
    pub fn governing_alarm(&self) -> Option<&AlarmSchedule> {
        self.governing.and_then(|index| self.table.get(index))
    }

    /// The current schedule table.
    pub fn table(&self) -> &ScheduleTable<N> {
        &self.table
    }

    /// The live ramp state, for status and diagnostic surfaces.
    pub fn ramp(&self) -> &DimRamp {
        &self.ramp
    }

    /// The lamp implementation.
    pub fn lamp(&self) -> &L {
        &self.lamp
    }
}
