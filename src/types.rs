//! Core value types for schedules and clock readings.

use core::ops::BitOr;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based index, Monday = 0 through Sunday = 6.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A set of weekdays.
///
/// Scheduling logic works in terms of [`contains`](DaySet::contains) and
/// set construction; the raw bit representation (bit 0 = Monday through
/// bit 6 = Sunday) is exposed only for the persistence layer via
/// [`bits`](DaySet::bits) / [`from_bits`](DaySet::from_bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaySet {
    bits: u8,
}

impl DaySet {
    /// No days.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Every day of the week.
    pub const ALL: Self = Self { bits: 0x7F };

    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self { bits: 0x1F };

    /// Saturday and Sunday.
    pub const WEEKEND: Self = Self { bits: 0x60 };

    /// A set containing exactly one day.
    pub const fn single(day: Weekday) -> Self {
        Self {
            bits: 1 << day.index(),
        }
    }

    /// Returns the set with `day` added.
    #[must_use]
    pub const fn with(self, day: Weekday) -> Self {
        Self {
            bits: self.bits | 1 << day.index(),
        }
    }

    /// Whether the set contains `day`.
    pub const fn contains(self, day: Weekday) -> bool {
        self.bits & (1 << day.index()) != 0
    }

    /// Whether the set contains no days.
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Raw day bits as persisted. The enabled flag (bit 7 on the wire) is
    /// not part of a `DaySet`.
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Builds a set from raw day bits. Bit 7 is ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0x7F }
    }
}

impl BitOr for DaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

/// A wall-clock reading: weekday plus time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    /// Current day of the week.
    pub weekday: Weekday,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Minute of hour, 0-59.
    pub minute: u8,
}

impl WallTime {
    /// Creates a wall-clock reading.
    pub const fn new(weekday: Weekday, hour: u8, minute: u8) -> Self {
        Self {
            weekday,
            hour,
            minute,
        }
    }

    /// Time of day as minutes since midnight.
    pub(crate) const fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

/// One scheduled dimming event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSchedule {
    /// Days of the week this alarm fires on.
    pub days: DaySet,
    /// Disabled alarms are kept in the table but never govern the lamp.
    pub enabled: bool,
    /// Trigger hour, 0-23.
    pub hour: u8,
    /// Trigger minute, 0-59.
    pub minute: u8,
    /// Brightness the ramp converges to while this alarm governs.
    pub target: u8,
    /// Brightness change per second, as a magnitude. The ramp derives the
    /// direction from where the target lies relative to the current value.
    pub rate: f32,
}

impl AlarmSchedule {
    /// Creates an enabled alarm.
    pub const fn new(days: DaySet, hour: u8, minute: u8, target: u8, rate: f32) -> Self {
        Self {
            days,
            enabled: true,
            hour,
            minute,
            target,
            rate,
        }
    }

    /// Whether the trigger time is within 0-23 / 0-59.
    ///
    /// Out-of-range entries are carried in the table (the persistence layer
    /// copies them verbatim) but never match during selection.
    pub const fn has_valid_time(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Trigger time as minutes since midnight.
    pub(crate) const fn trigger_minutes(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}
