//! Binary persistence layout for schedule tables.
//!
//! The persisted block is a fixed header followed by fixed-width entries,
//! written and read as one contiguous slice. The codec only defines what
//! the bytes mean; moving them to and from EEPROM or flash is the storage
//! driver's job.
//!
//! Version 1 layout, little-endian:
//!
//! | Offset   | Field      | Width    | Meaning                              |
//! |----------|------------|----------|--------------------------------------|
//! | 0        | magic      | 10 bytes | `b"SUNLAMPSCH"`                      |
//! | 10       | version    | u16 LE   | format version                       |
//! | 12       | count      | u8       | number of entries that follow        |
//! | 13 + 8·i | entries[i] | 8 bytes  | day/enable, hour, minute, target, rate f32 LE |
//!
//! Day/enable byte: bit 0 = Monday through bit 6 = Sunday, bit 7 = the
//! enabled flag. The layout is a compatibility contract; any change to it
//! requires bumping [`FORMAT_VERSION`].

use crate::schedule::ScheduleTable;
use crate::types::{AlarmSchedule, DaySet};

/// Magic constant opening every valid block.
pub const MAGIC: [u8; 10] = *b"SUNLAMPSCH";

/// Persisted format version this build reads and writes.
pub const FORMAT_VERSION: u16 = 1;

/// Header size in bytes: magic + version + count.
pub const HEADER_LEN: usize = 13;

/// Size of one encoded schedule entry in bytes.
pub const ENTRY_LEN: usize = 8;

const ENABLED_BIT: u8 = 0x80;

/// Total block size for a table with `count` entries.
pub const fn block_len(count: usize) -> usize {
    HEADER_LEN + count * ENTRY_LEN
}

/// Persistence codec errors.
///
/// All of these mean "no valid persisted data": callers substitute an
/// empty table and keep running rather than refusing to boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// The magic constant does not match; not a schedule block.
    HeaderMismatch,
    /// The block was written by an unsupported format version.
    VersionMismatch {
        /// Version found in the block
        found: u16,
    },
    /// The declared entry count exceeds the decoding table's capacity.
    CountOutOfRange {
        /// Count declared in the block header
        count: u8,
        /// Capacity of the decoding table
        capacity: usize,
    },
    /// The block is shorter than its header or its declared payload.
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },
    /// The output buffer cannot hold the encoded block.
    BufferTooSmall {
        /// Bytes required
        needed: usize,
        /// Bytes available
        available: usize,
    },
}

impl core::fmt::Display for PersistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PersistError::HeaderMismatch => {
                write!(f, "block does not start with the schedule magic")
            }
            PersistError::VersionMismatch { found } => {
                write!(
                    f,
                    "unsupported format version {} (expected {})",
                    found, FORMAT_VERSION
                )
            }
            PersistError::CountOutOfRange { count, capacity } => {
                write!(
                    f,
                    "block declares {} entries but the table holds at most {}",
                    count, capacity
                )
            }
            PersistError::Truncated { expected, actual } => {
                write!(f, "block is {} bytes, expected {}", actual, expected)
            }
            PersistError::BufferTooSmall { needed, available } => {
                write!(
                    f,
                    "buffer holds {} bytes, encoded block needs {}",
                    available, needed
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PersistError {}

fn pack_day_flags(days: DaySet, enabled: bool) -> u8 {
    days.bits() | if enabled { ENABLED_BIT } else { 0 }
}

fn unpack_day_flags(byte: u8) -> (DaySet, bool) {
    (DaySet::from_bits(byte), byte & ENABLED_BIT != 0)
}

/// Encodes `table` into `buffer` and returns the block length.
///
/// The emitted block always carries the current [`MAGIC`] and
/// [`FORMAT_VERSION`] and round-trips exactly through [`decode`].
///
/// # Errors
/// * `BufferTooSmall` - `buffer` cannot hold the encoded block
/// * `CountOutOfRange` - the table holds more entries than the one-byte
///   count field can express
pub fn encode<const N: usize>(
    table: &ScheduleTable<N>,
    buffer: &mut [u8],
) -> Result<usize, PersistError> {
    if table.len() > usize::from(u8::MAX) {
        return Err(PersistError::CountOutOfRange {
            count: u8::MAX,
            capacity: usize::from(u8::MAX),
        });
    }

    let needed = block_len(table.len());
    if buffer.len() < needed {
        return Err(PersistError::BufferTooSmall {
            needed,
            available: buffer.len(),
        });
    }

    buffer[..MAGIC.len()].copy_from_slice(&MAGIC);
    buffer[10..12].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
    buffer[12] = table.len() as u8;

    for (index, alarm) in table.iter().enumerate() {
        let entry = &mut buffer[HEADER_LEN + index * ENTRY_LEN..][..ENTRY_LEN];
        entry[0] = pack_day_flags(alarm.days, alarm.enabled);
        entry[1] = alarm.hour;
        entry[2] = alarm.minute;
        entry[3] = alarm.target;
        entry[4..8].copy_from_slice(&alarm.rate.to_le_bytes());
    }

    Ok(needed)
}

/// Decodes a persisted block into a fresh schedule table.
///
/// Entries are copied verbatim: the codec validates the block's integrity
/// (magic, version, count, length) but not the semantics of individual
/// alarms, so a single out-of-range trigger time degrades to one inert
/// entry at selection time instead of rejecting the whole table.
///
/// # Errors
/// * `Truncated` - block shorter than the header or the declared payload
/// * `HeaderMismatch` - magic constant differs
/// * `VersionMismatch` - version differs from [`FORMAT_VERSION`]
/// * `CountOutOfRange` - declared count exceeds the table capacity `N`
pub fn decode<const N: usize>(block: &[u8]) -> Result<ScheduleTable<N>, PersistError> {
    if block.len() < HEADER_LEN {
        return Err(PersistError::Truncated {
            expected: HEADER_LEN,
            actual: block.len(),
        });
    }
    if block[..MAGIC.len()] != MAGIC {
        return Err(PersistError::HeaderMismatch);
    }

    let version = u16::from_le_bytes([block[10], block[11]]);
    if version != FORMAT_VERSION {
        return Err(PersistError::VersionMismatch { found: version });
    }

    let count = block[12];
    if usize::from(count) > N {
        return Err(PersistError::CountOutOfRange { count, capacity: N });
    }

    let needed = block_len(usize::from(count));
    if block.len() < needed {
        return Err(PersistError::Truncated {
            expected: needed,
            actual: block.len(),
        });
    }

    let mut table = ScheduleTable::new();
    for index in 0..usize::from(count) {
        let entry = &block[HEADER_LEN + index * ENTRY_LEN..][..ENTRY_LEN];
        let (days, enabled) = unpack_day_flags(entry[0]);

        let alarm = AlarmSchedule {
            days,
            enabled,
            hour: entry[1],
            minute: entry[2],
            target: entry[3],
            rate: f32::from_le_bytes([entry[4], entry[5], entry[6], entry[7]]),
        };

        if table.push(alarm).is_err() {
            return Err(PersistError::CountOutOfRange { count, capacity: N });
        }
    }

    Ok(table)
}
