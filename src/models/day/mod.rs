// Day module
// One conference day: ordered slots, ordered rooms and the items placed in them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::room::Room;
use crate::models::schedule_item::ScheduleItem;
use crate::models::slot::Slot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub day: NaiveDate,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Day {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            slots: Vec::new(),
            rooms: Vec::new(),
        }
    }

    /// Header label, e.g. "Friday 24 May"
    pub fn label(&self) -> String {
        self.day.format("%A %-d %B").to_string()
    }

    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    /// Every placed item together with the slot it starts in
    pub fn items(&self) -> impl Iterator<Item = (&Slot, &ScheduleItem)> {
        self.slots
            .iter()
            .flat_map(|slot| slot.items.iter().map(move |item| (slot, item)))
    }

    pub fn item_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.items.len()).sum()
    }
}

/// All days of a conference, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Schedule {
    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn sample_day() -> Day {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2025, 5, 30).unwrap());
        day.rooms = vec![Room::new("r1", "Tagliatelle"), Room::new("r2", "Ravioli")];
        let mut slot = Slot::new("s1", NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30);
        slot.items.push(ScheduleItem::new("i1", "Registration"));
        day.slots.push(slot);
        day.slots
            .push(Slot::new("s2", NaiveTime::from_hms_opt(9, 30, 0).unwrap(), 30));
        day
    }

    #[test]
    fn test_day_lookups() {
        let day = sample_day();
        assert_eq!(day.room("r2").map(|room| room.name.as_str()), Some("Ravioli"));
        assert!(day.room("missing").is_none());
        assert_eq!(day.slot("s2").map(|slot| slot.duration), Some(30));
        assert_eq!(day.item_count(), 1);
        assert_eq!(day.label(), "Friday 30 May");
    }
}
