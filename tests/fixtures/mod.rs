// Test fixtures - reusable schedule data
// Provides consistent days, rooms and items across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use schedule_builder::models::day::{Day, Schedule};
use schedule_builder::models::room::{Room, RoomRef};
use schedule_builder::models::schedule_item::{ItemType, ScheduleItem, Speaker, SubmissionRef};
use schedule_builder::models::slot::Slot;

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn conference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 29).unwrap()
}

pub fn rooms(count: usize) -> Vec<Room> {
    (0..count)
        .map(|i| Room::new(format!("r{}", i + 1), format!("Room {}", i + 1)))
        .collect()
}

/// Back-to-back slots of equal length starting at 09:00.
pub fn even_slots(count: usize, duration: u32) -> Vec<Slot> {
    (0..count)
        .map(|i| {
            let minutes = 9 * 60 + i as u32 * duration;
            Slot::new(format!("s{}", i + 1), time(minutes / 60 % 24, minutes % 60), duration)
        })
        .collect()
}

pub fn talk(id: &str, title: &str, room_ids: &[&str]) -> ScheduleItem {
    let mut item = ScheduleItem::new(id, title);
    item.item_type = ItemType::Submission;
    item.rooms = room_ids
        .iter()
        .map(|room| RoomRef {
            id: room.to_string(),
        })
        .collect();
    item.submission = Some(SubmissionRef {
        id: format!("sub-{}", id),
        title: None,
        duration: None,
    });
    item.speakers.push(Speaker {
        full_name: format!("Speaker {}", id),
    });
    item
}

/// One day, three rooms, slots 10:00/10:30/11:00 (30 min) and 11:30 (60 min).
/// A 60 minute talk sits at 10:00 in room 1 and a plenary at 11:30 spans all rooms.
pub fn sample_day() -> Day {
    let mut day = Day::new(conference_day());
    day.rooms = rooms(3);

    let mut first = Slot::new("s1", time(10, 0), 30);
    let mut long_talk = talk("t1", "Lifetimes in anger", &["r1"]);
    long_talk.duration = Some(60);
    first.items.push(long_talk);

    let second = Slot::new("s2", time(10, 30), 30);
    let third = Slot::new("s3", time(11, 0), 30);

    let mut fourth = Slot::new("s4", time(11, 30), 60);
    let mut plenary = ScheduleItem::new("k1", "Opening keynote");
    plenary.item_type = ItemType::Keynote;
    plenary.rooms = day.rooms.iter().map(RoomRef::from).collect();
    fourth.items.push(plenary);

    day.slots = vec![first, second, third, fourth];
    day
}

pub fn sample_schedule() -> Schedule {
    Schedule {
        days: vec![sample_day()],
    }
}

pub fn unassigned_items() -> Vec<ScheduleItem> {
    vec![
        talk("u1", "Async without tears", &[]),
        talk("u2", "Zero-copy parsing", &[]),
    ]
}
