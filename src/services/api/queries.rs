// GraphQL documents sent to the conference backend

pub const SCHEDULE_ITEM_FIELDS: &str = r#"
fragment ScheduleItemFields on ScheduleItem {
  id
  title
  duration
  type
  status
  highlightColor
  rooms { id }
  speakers { fullName }
  audienceLevel { name }
  language { code }
  keynote { id }
  submission {
    id
    title
    duration { duration }
  }
}
"#;

pub const CONFERENCE_SCHEDULE: &str = r#"
query ConferenceSchedule($code: String!) {
  conference(code: $code) {
    days {
      day
      rooms { id name type }
      slots {
        id
        hour
        duration
        items { ...ScheduleItemFields }
      }
    }
  }
}
"#;

pub const UNASSIGNED_SCHEDULE_ITEMS: &str = r#"
query UnassignedScheduleItems($code: String!) {
  conference(code: $code) {
    unassignedScheduleItems { ...ScheduleItemFields }
  }
}
"#;

pub const UPDATE_SLOT: &str = r#"
mutation UpdateSlot($input: UpdateOrCreateSlotItemInput!) {
  updateOrCreateSlotItem(input: $input) {
    __typename
    ... on UpdateOrCreateSlotItemError { message }
    ... on UpdateOrCreateSlotItemResult {
      updatedSlots { id hour duration }
    }
  }
}
"#;

pub const MOVE_ITEM: &str = r#"
mutation MoveItem($itemId: ID!) {
  moveScheduleItem(itemId: $itemId) {
    __typename
    ... on MoveScheduleItemError { message }
  }
}
"#;

pub const ADD_SLOT: &str = r#"
mutation AddScheduleSlot($conference: ID!, $duration: Int!, $day: Date!) {
  addScheduleSlot(conference: $conference, duration: $duration, day: $day) {
    __typename
    ... on AddScheduleSlotError { message }
  }
}
"#;

/// Append the shared item fragment to a document that spreads it.
pub fn with_item_fragment(document: &str) -> String {
    format!("{}\n{}", document.trim(), SCHEDULE_ITEM_FIELDS.trim())
}
