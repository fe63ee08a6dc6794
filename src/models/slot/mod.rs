// Slot module
// A fixed time-of-day row in the schedule grid

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::schedule_item::ScheduleItem;
use crate::utils::time::{hour_format, minutes_since_midnight};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    #[serde(with = "hour_format")]
    pub hour: NaiveTime,
    /// Default duration in minutes
    pub duration: u32,
    /// Items that start in this slot
    #[serde(default)]
    pub items: Vec<ScheduleItem>,
}

impl Slot {
    pub fn new(id: impl Into<String>, hour: NaiveTime, duration: u32) -> Self {
        Self {
            id: id.into(),
            hour,
            duration,
            items: Vec::new(),
        }
    }

    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.hour)
    }

    pub fn end_minutes(&self) -> u32 {
        self.start_minutes().saturating_add(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_window_in_minutes() {
        let slot = Slot::new("s1", NaiveTime::from_hms_opt(10, 30, 0).unwrap(), 45);
        assert_eq!(slot.start_minutes(), 630);
        assert_eq!(slot.end_minutes(), 675);
    }

    #[test]
    fn test_end_minutes_saturates() {
        let slot = Slot::new("s1", NaiveTime::from_hms_opt(23, 0, 0).unwrap(), u32::MAX);
        assert_eq!(slot.end_minutes(), u32::MAX);
    }

    #[test]
    fn test_deserialize_slot_with_items() {
        let raw = r#"{
            "id": "3",
            "hour": "09:00:00",
            "duration": 30,
            "items": [{"id": "i1", "title": "Welcome", "rooms": [{"id": "r1"}]}]
        }"#;
        let slot: Slot = serde_json::from_str(raw).unwrap();
        assert_eq!(slot.start_minutes(), 540);
        assert_eq!(slot.items.len(), 1);
        assert_eq!(slot.items[0].title, "Welcome");
    }

    #[test]
    fn test_deserialize_slot_rejects_bad_hour() {
        let raw = r#"{"id": "3", "hour": "nine", "duration": 30}"#;
        assert!(serde_json::from_str::<Slot>(raw).is_err());
    }
}
