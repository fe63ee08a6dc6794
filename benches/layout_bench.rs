// Benchmark for day grid layout
// Measures layout computation for typical and large conference days

use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schedule_builder::models::day::Day;
use schedule_builder::models::room::{Room, RoomRef};
use schedule_builder::models::schedule_item::ScheduleItem;
use schedule_builder::models::slot::Slot;
use schedule_builder::services::layout::compute_day_layout;

/// Day of `slots` 30 minute slots and `rooms` rooms, with an hour-long talk
/// in every other cell.
fn build_day(slots: usize, rooms: usize) -> Day {
    let mut day = Day::new(NaiveDate::from_ymd_opt(2025, 5, 29).unwrap());
    day.rooms = (0..rooms)
        .map(|i| Room::new(format!("r{}", i), format!("Room {}", i)))
        .collect();

    for s in 0..slots {
        let minutes = (8 * 60 + s * 30) as u32 % (24 * 60);
        let mut slot = Slot::new(
            format!("s{}", s),
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap(),
            30,
        );
        if s % 2 == 0 {
            for room in day.rooms.iter().step_by(2) {
                let mut item = ScheduleItem::new(format!("i{}-{}", s, room.id), "Talk");
                item.duration = Some(60);
                item.rooms.push(RoomRef::from(room));
                slot.items.push(item);
            }
        }
        day.slots.push(slot);
    }
    day
}

fn bench_day_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_layout");

    for (slots, rooms) in [(20, 4), (30, 8), (40, 16)] {
        let day = build_day(slots, rooms);
        group.bench_with_input(
            BenchmarkId::new("compute", format!("{}x{}", slots, rooms)),
            &day,
            |b, day| b.iter(|| compute_day_layout(black_box(day))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_day_layout);
criterion_main!(benches);
