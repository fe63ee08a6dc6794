// Schedule item module
// A talk, keynote, training or custom block that can be placed on the grid

use serde::{Deserialize, Serialize};

use crate::models::room::RoomRef;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[default]
    #[serde(alias = "SUBMISSION")]
    Submission,
    #[serde(alias = "TRAINING")]
    Training,
    #[serde(alias = "KEYNOTE")]
    Keynote,
    #[serde(alias = "CUSTOM")]
    Custom,
}

impl ItemType {
    /// Short badge text shown on item cards
    pub fn badge(&self) -> &'static str {
        match self {
            ItemType::Submission => "Talk",
            ItemType::Training => "Training",
            ItemType::Keynote => "Keynote",
            ItemType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[serde(alias = "CONFIRMED")]
    Confirmed,
    #[serde(alias = "MAYBE")]
    Maybe,
    #[default]
    #[serde(alias = "WAITING_CONFIRMATION")]
    WaitingConfirmation,
    #[serde(alias = "CANCELLED")]
    Cancelled,
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Confirmed => "Confirmed",
            ItemStatus::Maybe => "Maybe",
            ItemStatus::WaitingConfirmation => "Waiting confirmation",
            ItemStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceLevel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeynoteRef {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDuration {
    pub duration: u32,
}

/// Linked proposal, used as a fallback for title and duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRef {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<SubmissionDuration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Explicit override of the slot's default duration, in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub rooms: Vec<RoomRef>,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub audience_level: Option<AudienceLevel>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub highlight_color: Option<String>,
    #[serde(default)]
    pub keynote: Option<KeynoteRef>,
    #[serde(default)]
    pub submission: Option<SubmissionRef>,
}

impl ScheduleItem {
    /// Create a bare custom item
    ///
    /// # Examples
    /// ```
    /// use schedule_builder::models::schedule_item::ScheduleItem;
    ///
    /// let item = ScheduleItem::new("42", "Lunch");
    /// assert_eq!(item.display_title(), "Lunch");
    /// assert!(item.rooms.is_empty());
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: None,
            rooms: Vec::new(),
            item_type: ItemType::Custom,
            status: ItemStatus::default(),
            speakers: Vec::new(),
            audience_level: None,
            language: None,
            highlight_color: None,
            keynote: None,
            submission: None,
        }
    }

    /// Title to render; blank titles fall back to the linked submission's title.
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            return &self.title;
        }
        self.submission
            .as_ref()
            .and_then(|submission| submission.title.as_deref())
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// Comma-joined speaker names
    pub fn speaker_names(&self) -> String {
        self.speakers
            .iter()
            .map(|speaker| speaker.full_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn keynote_id(&self) -> Option<&str> {
        self.keynote.as_ref().map(|keynote| keynote.id.as_str())
    }

    pub fn submission_id(&self) -> Option<&str> {
        self.submission.as_ref().map(|submission| submission.id.as_str())
    }

    /// Duration declared by the linked submission, if any.
    pub fn submission_duration(&self) -> Option<u32> {
        self.submission
            .as_ref()
            .and_then(|submission| submission.duration)
            .map(|duration| duration.duration)
    }

    /// Case-insensitive substring match on title and speaker names.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.display_title().to_lowercase().contains(&needle)
            || self
                .speakers
                .iter()
                .any(|speaker| speaker.full_name.to_lowercase().contains(&needle))
    }
}
