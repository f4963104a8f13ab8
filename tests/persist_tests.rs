//! Integration tests for the persistence codec

use sunlamp_scheduler::persist::{
    self, ENTRY_LEN, FORMAT_VERSION, HEADER_LEN, MAGIC, PersistError, block_len,
};
use sunlamp_scheduler::{AlarmSchedule, DaySet, ScheduleTable, Weekday};

fn sample_table() -> ScheduleTable<8> {
    let mut off_alarm = AlarmSchedule::new(DaySet::ALL, 23, 0, 0, 2.5);
    off_alarm.enabled = false;

    ScheduleTable::from_slice(&[
        AlarmSchedule::new(DaySet::WEEKDAYS, 7, 0, 100, 5.0),
        AlarmSchedule::new(DaySet::WEEKEND, 9, 30, 180, 12.5),
        off_alarm,
    ])
    .unwrap()
}

#[test]
fn encode_decode_round_trips_exactly() {
    let table = sample_table();

    let mut block = [0u8; block_len(8)];
    let len = persist::encode(&table, &mut block).unwrap();
    assert_eq!(len, block_len(3));

    let restored: ScheduleTable<8> = persist::decode(&block[..len]).unwrap();
    assert_eq!(restored, table);
}

#[test]
fn empty_table_round_trips() {
    let table = ScheduleTable::<8>::new();

    let mut block = [0u8; HEADER_LEN];
    let len = persist::encode(&table, &mut block).unwrap();
    assert_eq!(len, HEADER_LEN);

    let restored: ScheduleTable<8> = persist::decode(&block).unwrap();
    assert!(restored.is_empty());
}

#[test]
fn encoded_bytes_match_the_documented_layout() {
    let alarm = AlarmSchedule::new(
        DaySet::single(Weekday::Monday).with(Weekday::Sunday),
        6,
        45,
        200,
        1.5,
    );
    let table = ScheduleTable::<4>::from_slice(&[alarm]).unwrap();

    let mut block = [0u8; block_len(1)];
    persist::encode(&table, &mut block).unwrap();

    assert_eq!(&block[..10], &MAGIC);
    assert_eq!(u16::from_le_bytes([block[10], block[11]]), FORMAT_VERSION);
    assert_eq!(block[12], 1);

    // Entry: day/enable byte (Mon = bit 0, Sun = bit 6, enabled = bit 7)
    assert_eq!(block[13], 0x80 | 0x40 | 0x01);
    assert_eq!(block[14], 6);
    assert_eq!(block[15], 45);
    assert_eq!(block[16], 200);
    assert_eq!(
        f32::from_le_bytes([block[17], block[18], block[19], block[20]]),
        1.5
    );
}

#[test]
fn wrong_magic_is_a_header_mismatch() {
    let mut block = [0u8; block_len(8)];
    let len = persist::encode(&sample_table(), &mut block).unwrap();
    block[0] = b'X';

    let result: Result<ScheduleTable<8>, _> = persist::decode(&block[..len]);
    assert_eq!(result, Err(PersistError::HeaderMismatch));
}

#[test]
fn unknown_version_is_rejected() {
    let mut block = [0u8; block_len(8)];
    let len = persist::encode(&sample_table(), &mut block).unwrap();
    block[10..12].copy_from_slice(&2u16.to_le_bytes());

    let result: Result<ScheduleTable<8>, _> = persist::decode(&block[..len]);
    assert_eq!(result, Err(PersistError::VersionMismatch { found: 2 }));
}

#[test]
fn count_beyond_capacity_rejects_the_whole_block() {
    let mut block = [0u8; block_len(8)];
    let len = persist::encode(&sample_table(), &mut block).unwrap();

    // Three entries do not fit a capacity-2 table
    let result: Result<ScheduleTable<2>, _> = persist::decode(&block[..len]);
    assert_eq!(
        result,
        Err(PersistError::CountOutOfRange {
            count: 3,
            capacity: 2
        })
    );
}

#[test]
fn truncated_blocks_are_rejected() {
    let mut block = [0u8; block_len(8)];
    let len = persist::encode(&sample_table(), &mut block).unwrap();

    let result: Result<ScheduleTable<8>, _> = persist::decode(&block[..len - 1]);
    assert_eq!(
        result,
        Err(PersistError::Truncated {
            expected: len,
            actual: len - 1
        })
    );

    let result: Result<ScheduleTable<8>, _> = persist::decode(&block[..4]);
    assert_eq!(
        result,
        Err(PersistError::Truncated {
            expected: HEADER_LEN,
            actual: 4
        })
    );
}

#[test]
fn encode_reports_undersized_buffers() {
    let table = sample_table();

    let mut block = [0u8; HEADER_LEN + ENTRY_LEN];
    let result = persist::encode(&table, &mut block);
    assert_eq!(
        result,
        Err(PersistError::BufferTooSmall {
            needed: block_len(3),
            available: HEADER_LEN + ENTRY_LEN
        })
    );
}

#[test]
fn decode_does_not_validate_entry_semantics() {
    // Damage stays confined to the one entry; the selector ignores it later
    let alarm = AlarmSchedule::new(DaySet::ALL, 99, 99, 7, 3.0);
    let table = ScheduleTable::<4>::from_slice(&[alarm]).unwrap();

    let mut block = [0u8; block_len(1)];
    let len = persist::encode(&table, &mut block).unwrap();

    let restored: ScheduleTable<4> = persist::decode(&block[..len]).unwrap();
    assert_eq!(restored.get(0).unwrap().hour, 99);
    assert!(!restored.get(0).unwrap().has_valid_time());
}
