#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlarmSchedule`**: A weekly recurrence (day set + trigger time) mapped to a target brightness and ramp rate
//! - **`ScheduleTable`**: A bounded, insertion-ordered collection of alarms, replaced wholesale between ticks
//! - **`DaySet`** / **`Weekday`**: Which days an alarm fires on
//! - **`SunlampController`**: Drives a single lamp - selects the governing alarm and ramps toward its target
//! - **`DimRamp`**: The live brightness state with wraparound-safe elapsed-time integration
//! - **`IdlePolicy`**: What the ramp does while no alarm governs
//! - **`Lamp`**: Trait to implement for your output hardware
//! - **`WallClock`** / **`MonotonicClock`**: Traits to implement for your timing system
//! - **`persist`**: The validated binary block layout for storing schedules on non-volatile media
//!
//! Brightness is a continuous `f32` in the range 0.0-255.0; alarm targets
//! are byte-valued. When implementing [`Lamp`] for your hardware, convert
//! to your device's native format (e.g., a PWM duty cycle).

pub mod time;
pub mod types;
pub mod schedule;
pub mod select;
pub mod ramp;
pub mod persist;
pub mod controller;
pub mod command;

pub use command::ControllerAction;
pub use controller::{IdlePolicy, Lamp, SunlampController};
pub use persist::PersistError;
pub use ramp::DimRamp;
pub use schedule::{ScheduleError, ScheduleTable};
pub use select::governing_alarm;
pub use time::{MonotonicClock, WallClock, elapsed_ms};
pub use types::{AlarmSchedule, DaySet, WallTime, Weekday};

/// Lowest valid brightness (lamp fully off).
pub const BRIGHTNESS_OFF: f32 = 0.0;

/// Highest valid brightness (lamp fully on).
pub const BRIGHTNESS_MAX: f32 = 255.0;
