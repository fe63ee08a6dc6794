// Unassigned items tray and the add-item search

use crate::models::schedule_item::{ItemType, ScheduleItem};

/// Unassigned items matching `query`, keynotes first, then by title.
pub fn filter_unassigned<'a>(items: &'a [ScheduleItem], query: &str) -> Vec<&'a ScheduleItem> {
    let mut matches: Vec<&ScheduleItem> = items.iter().filter(|item| item.matches_query(query)).collect();
    matches.sort_by(|a, b| {
        let a_keynote = a.item_type == ItemType::Keynote;
        let b_keynote = b.item_type == ItemType::Keynote;
        b_keynote
            .cmp(&a_keynote)
            .then_with(|| a.display_title().to_lowercase().cmp(&b.display_title().to_lowercase()))
    });
    matches
}

/// Header shown in the add-item dialog
pub fn add_item_prompt(slot_label: &str, room_name: &str) -> String {
    format!("You are adding an item to slot {} in room {}", slot_label, room_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule_item::Speaker;

    fn items() -> Vec<ScheduleItem> {
        let mut keynote = ScheduleItem::new("k", "Zen of scheduling");
        keynote.item_type = ItemType::Keynote;
        let mut talk = ScheduleItem::new("t", "async in practice");
        talk.speakers.push(Speaker {
            full_name: "Zed Shaw".to_string(),
        });
        vec![ScheduleItem::new("c", "Coffee break"), talk, keynote]
    }

    #[test]
    fn test_empty_query_lists_everything_keynotes_first() {
        let all = items();
        let ids: Vec<&str> = filter_unassigned(&all, "").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["k", "t", "c"]);
    }

    #[test]
    fn test_query_matches_title_or_speaker() {
        let all = items();
        let ids: Vec<&str> = filter_unassigned(&all, "ze").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["k", "t"]);
    }

    #[test]
    fn test_prompt_mentions_cell() {
        assert_eq!(
            add_item_prompt("10.30", "Main hall"),
            "You are adding an item to slot 10.30 in room Main hall"
        );
    }
}
