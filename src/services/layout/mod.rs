//! Grid geometry for a conference day.
//!
//! The grid is laid out like a CSS grid with 1-based lines: row 1 holds the
//! room headers and column 1 holds the time gutter. Every slot gets exactly
//! one row regardless of its duration, and every room gets one column.
//! Items starting in a slot span as many rows as the slots their time window
//! touches, and as many columns as the rooms they occupy.

use std::collections::HashSet;

use crate::models::day::Day;
use crate::models::room::Room;
use crate::models::schedule_item::ScheduleItem;
use crate::models::slot::Slot;
use crate::utils::time::format_hour;

pub const HEADER_ROW: usize = 1;
pub const FIRST_SLOT_ROW: usize = 2;
pub const GUTTER_COLUMN: usize = 1;
pub const FIRST_ROOM_COLUMN: usize = 2;

/// Half-open rectangle of grid lines: `[row_start, row_end) × [column_start, column_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridArea {
    pub row_start: usize,
    pub row_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl GridArea {
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn column_span(&self) -> usize {
        self.column_end - self.column_start
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        (self.row_start..self.row_end).contains(&row)
            && (self.column_start..self.column_end).contains(&column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub slot_id: String,
    pub row_start: usize,
    pub row_end: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomColumn {
    pub room_id: String,
    pub name: String,
    pub column: usize,
}

/// Where an item's duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSource {
    Item,
    Slot,
    Submission,
    /// No duration anywhere; the item is shown as a single-slot item.
    SingleSlotDefault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPlacement {
    pub item: ScheduleItem,
    pub slot_id: String,
    pub area: GridArea,
    pub duration_source: DurationSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderCell {
    pub slot_id: String,
    pub room_id: String,
    pub area: GridArea,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLayout {
    pub rows: Vec<SlotRow>,
    pub columns: Vec<RoomColumn>,
    pub items: Vec<ItemPlacement>,
    pub placeholders: Vec<PlaceholderCell>,
    /// Items whose rooms are not part of this day; they cannot be drawn.
    pub unplaced_item_ids: Vec<String>,
}

impl DayLayout {
    /// One past the last grid row line in use.
    pub fn row_count(&self) -> usize {
        FIRST_SLOT_ROW + self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        FIRST_ROOM_COLUMN + self.columns.len()
    }

    pub fn item_at(&self, row: usize, column: usize) -> Option<&ItemPlacement> {
        self.items
            .iter()
            .find(|placement| placement.area.contains(row, column))
    }
}

/// Row lines for every slot, in slot order.
pub fn slot_rows(slots: &[Slot]) -> Vec<SlotRow> {
    slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let row_start = FIRST_SLOT_ROW + index;
            SlotRow {
                slot_id: slot.id.clone(),
                row_start,
                row_end: row_start + 1,
                label: format_hour(slot.hour),
            }
        })
        .collect()
}

pub fn room_columns(rooms: &[Room]) -> Vec<RoomColumn> {
    rooms
        .iter()
        .enumerate()
        .map(|(index, room)| RoomColumn {
            room_id: room.id.clone(),
            name: room.name.clone(),
            column: FIRST_ROOM_COLUMN + index,
        })
        .collect()
}

/// Duration of `item` when placed in `slot`: the item's own override, then the
/// slot default, then the linked submission. Zero counts as unset.
pub fn resolve_duration(item: &ScheduleItem, slot: &Slot) -> (Option<u32>, DurationSource) {
    let non_zero = |value: Option<u32>| value.filter(|minutes| *minutes > 0);

    if let Some(minutes) = non_zero(item.duration) {
        (Some(minutes), DurationSource::Item)
    } else if let Some(minutes) = non_zero(Some(slot.duration)) {
        (Some(minutes), DurationSource::Slot)
    } else if let Some(minutes) = non_zero(item.submission_duration()) {
        (Some(minutes), DurationSource::Submission)
    } else {
        (None, DurationSource::SingleSlotDefault)
    }
}

/// Number of rows an item starting in `slots[current]` spans.
///
/// The span ends at the first slot, from the item's own onwards, that ends
/// after the item does; an item ending mid-slot does not claim that slot.
/// Without such a slot the item runs to the end of the day. Never less than
/// one row.
pub fn item_row_span(slots: &[Slot], current: usize, duration: Option<u32>) -> usize {
    let Some(slot) = slots.get(current) else {
        return 1;
    };
    let Some(duration) = duration else {
        return 1;
    };

    let end = slot.start_minutes().saturating_add(duration);
    let ending = slots
        .iter()
        .enumerate()
        .skip(current)
        .find(|(_, candidate)| candidate.end_minutes() > end)
        .map(|(index, _)| index)
        .unwrap_or(slots.len());

    ending.saturating_sub(current).max(1)
}

/// Column lines for an item: starts at its lowest room index, spans one
/// column per room. `None` when none of its rooms belong to the day.
pub fn item_column_span(rooms: &[Room], item: &ScheduleItem) -> Option<(usize, usize)> {
    let mut indexes: Vec<usize> = item
        .rooms
        .iter()
        .filter_map(|room_ref| rooms.iter().position(|room| room.id == room_ref.id))
        .collect();
    indexes.sort_unstable();
    indexes.dedup();

    let lowest = *indexes.first()?;
    let column_start = FIRST_ROOM_COLUMN + lowest;
    let column_end = (column_start + indexes.len()).min(FIRST_ROOM_COLUMN + rooms.len());
    Some((column_start, column_end))
}

/// Full layout for a day: rows, columns, item areas and the placeholders for
/// every cell no item covers.
pub fn compute_day_layout(day: &Day) -> DayLayout {
    let rows = slot_rows(&day.slots);
    let columns = room_columns(&day.rooms);

    let mut items = Vec::new();
    let mut unplaced_item_ids = Vec::new();

    for (slot_index, slot) in day.slots.iter().enumerate() {
        let row_start = rows[slot_index].row_start;

        for item in &slot.items {
            let Some((column_start, column_end)) = item_column_span(&day.rooms, item) else {
                log::warn!(
                    "Schedule item {} in slot {} has no room on {}",
                    item.id,
                    slot.id,
                    day.day
                );
                unplaced_item_ids.push(item.id.clone());
                continue;
            };

            let (duration, duration_source) = resolve_duration(item, slot);
            if duration_source == DurationSource::SingleSlotDefault {
                log::debug!(
                    "Schedule item {} has no duration; showing it as a single slot",
                    item.id
                );
            }

            let row_span = item_row_span(&day.slots, slot_index, duration);
            items.push(ItemPlacement {
                item: item.clone(),
                slot_id: slot.id.clone(),
                area: GridArea {
                    row_start,
                    row_end: row_start + row_span,
                    column_start,
                    column_end,
                },
                duration_source,
            });
        }
    }

    let covered: HashSet<(usize, usize)> = items
        .iter()
        .flat_map(|placement| {
            let area = placement.area;
            (area.row_start..area.row_end)
                .flat_map(move |row| (area.column_start..area.column_end).map(move |col| (row, col)))
        })
        .collect();

    let placeholders = rows
        .iter()
        .flat_map(|row| {
            columns.iter().map(move |column| (row, column))
        })
        .filter(|(row, column)| !covered.contains(&(row.row_start, column.column)))
        .map(|(row, column)| PlaceholderCell {
            slot_id: row.slot_id.clone(),
            room_id: column.room_id.clone(),
            area: GridArea {
                row_start: row.row_start,
                row_end: row.row_end,
                column_start: column.column,
                column_end: column.column + 1,
            },
        })
        .collect();

    DayLayout {
        rows,
        columns,
        items,
        placeholders,
        unplaced_item_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::RoomRef;
    use crate::models::schedule_item::{SubmissionDuration, SubmissionRef};
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn slot(id: &str, hour: u32, minute: u32, duration: u32) -> Slot {
        Slot::new(id, NaiveTime::from_hms_opt(hour, minute, 0).unwrap(), duration)
    }

    fn rooms(count: usize) -> Vec<Room> {
        (0..count)
            .map(|i| Room::new(format!("r{}", i), format!("Room {}", i)))
            .collect()
    }

    fn item_in(id: &str, room_ids: &[&str], duration: Option<u32>) -> ScheduleItem {
        let mut item = ScheduleItem::new(id, id);
        item.duration = duration;
        item.rooms = room_ids
            .iter()
            .map(|room| RoomRef { id: room.to_string() })
            .collect();
        item
    }

    fn three_half_hours() -> Vec<Slot> {
        vec![slot("a", 10, 0, 30), slot("b", 10, 30, 30), slot("c", 11, 0, 30)]
    }

    #[test]
    fn test_rows_start_after_header() {
        let rows = slot_rows(&three_half_hours());
        let starts: Vec<usize> = rows.iter().map(|row| row.row_start).collect();
        assert_eq!(starts, vec![2, 3, 4]);
        assert!(rows.iter().all(|row| row.row_end == row.row_start + 1));
        assert_eq!(rows[1].label, "10.30");
    }

    #[test]
    fn test_room_columns_skip_gutter() {
        let columns = room_columns(&rooms(3));
        let values: Vec<usize> = columns.iter().map(|c| c.column).collect();
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[test]
    fn test_column_span_from_lowest_room() {
        let day_rooms = rooms(5);
        let item = item_in("x", &["r3", "r2"], None);
        assert_eq!(item_column_span(&day_rooms, &item), Some((4, 6)));
    }

    #[test]
    fn test_column_span_ignores_unknown_rooms() {
        let day_rooms = rooms(2);
        assert_eq!(item_column_span(&day_rooms, &item_in("x", &["zz"], None)), None);
        assert_eq!(
            item_column_span(&day_rooms, &item_in("y", &["zz", "r1"], None)),
            Some((3, 4))
        );
    }

    #[test]
    fn test_hour_long_item_spans_two_half_hour_slots() {
        assert_eq!(item_row_span(&three_half_hours(), 0, Some(60)), 2);
    }

    #[test]
    fn test_item_overrunning_the_day_spans_to_the_end() {
        assert_eq!(item_row_span(&three_half_hours(), 1, Some(240)), 2);
    }

    #[test]
    fn test_short_item_still_takes_one_row() {
        assert_eq!(item_row_span(&three_half_hours(), 0, Some(10)), 1);
    }

    #[test]
    fn test_item_ending_mid_slot_stops_before_it() {
        // 10:00 + 45 ends inside the 10:30 slot, which outlasts it
        assert_eq!(item_row_span(&three_half_hours(), 0, Some(45)), 1);
        assert_eq!(item_row_span(&three_half_hours(), 0, Some(75)), 2);
    }

    #[test]
    fn test_huge_duration_runs_to_end_of_day() {
        assert_eq!(item_row_span(&three_half_hours(), 0, Some(u32::MAX)), 3);
        assert_eq!(item_row_span(&three_half_hours(), 2, Some(u32::MAX)), 1);
    }

    #[test]
    fn test_heterogeneous_slot_durations() {
        let slots = vec![
            slot("a", 9, 0, 15),
            slot("b", 9, 15, 45),
            slot("c", 10, 0, 30),
            slot("d", 10, 30, 60),
        ];
        assert_eq!(item_row_span(&slots, 0, Some(60)), 2);
        assert_eq!(item_row_span(&slots, 1, Some(75)), 2);
        assert_eq!(item_row_span(&slots, 2, Some(90)), 2);
    }

    #[test]
    fn test_duration_fallback_order() {
        let base_slot = slot("a", 10, 0, 30);
        let mut item = item_in("x", &["r0"], Some(90));
        assert_eq!(resolve_duration(&item, &base_slot), (Some(90), DurationSource::Item));

        item.duration = None;
        assert_eq!(resolve_duration(&item, &base_slot), (Some(30), DurationSource::Slot));

        let empty_slot = slot("b", 10, 0, 0);
        item.submission = Some(SubmissionRef {
            id: "s".to_string(),
            title: None,
            duration: Some(SubmissionDuration { duration: 45 }),
        });
        assert_eq!(
            resolve_duration(&item, &empty_slot),
            (Some(45), DurationSource::Submission)
        );

        item.submission = None;
        assert_eq!(
            resolve_duration(&item, &empty_slot),
            (None, DurationSource::SingleSlotDefault)
        );
    }

    #[test]
    fn test_day_layout_places_items_and_placeholders() {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2025, 5, 28).unwrap());
        day.rooms = rooms(3);
        day.slots = three_half_hours();
        day.slots[0].items.push(item_in("keynote", &["r0", "r1", "r2"], Some(60)));
        day.slots[2].items.push(item_in("talk", &["r1"], None));

        let layout = compute_day_layout(&day);

        assert_eq!(layout.items.len(), 2);
        let keynote = &layout.items[0];
        assert_eq!(
            keynote.area,
            GridArea {
                row_start: 2,
                row_end: 4,
                column_start: 2,
                column_end: 5
            }
        );
        assert_eq!(layout.items[1].duration_source, DurationSource::Slot);

        // 9 cells, 6 under the keynote, 1 under the talk
        assert_eq!(layout.placeholders.len(), 2);
        let free: Vec<(&str, &str)> = layout
            .placeholders
            .iter()
            .map(|cell| (cell.slot_id.as_str(), cell.room_id.as_str()))
            .collect();
        assert_eq!(free, vec![("c", "r0"), ("c", "r2")]);
        assert_eq!(layout.item_at(3, 3).map(|p| p.item.id.as_str()), Some("keynote"));
    }

    #[test]
    fn test_day_layout_reports_roomless_items() {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2025, 5, 28).unwrap());
        day.rooms = rooms(1);
        day.slots = vec![slot("a", 9, 0, 30)];
        day.slots[0].items.push(item_in("ghost", &["elsewhere"], None));

        let layout = compute_day_layout(&day);
        assert!(layout.items.is_empty());
        assert_eq!(layout.unplaced_item_ids, vec!["ghost".to_string()]);
        assert_eq!(layout.placeholders.len(), 1);
    }
}
