//! Boundary to the conference backend.
//!
//! Everything the board reads or changes goes through [`ScheduleApi`]. The
//! production implementation is [`GraphqlClient`]; tests substitute doubles.

pub mod client;
pub mod queries;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::day::Schedule;
use crate::models::schedule_item::ScheduleItem;
use crate::utils::time::hour_format;

pub use client::GraphqlClient;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Graphql(String),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing `{0}`")]
    MissingData(&'static str),
}

/// Placement request for the update-slot mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotInput {
    pub slot_id: String,
    pub rooms: Vec<String>,
    pub item_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keynote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
}

impl UpdateSlotInput {
    /// Input for dropping `item` into the single cell (`slot_id`, `room_id`).
    /// The title is left empty so the server keeps the item's own.
    pub fn for_drop(item: &ScheduleItem, slot_id: &str, room_id: &str) -> Self {
        Self {
            slot_id: slot_id.to_string(),
            rooms: vec![room_id.to_string()],
            item_id: item.id.clone(),
            title: String::new(),
            keynote_id: item.keynote_id().map(str::to_string),
            submission_id: item.submission_id().map(str::to_string),
        }
    }
}

/// Slot touched by an update-slot mutation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatedSlot {
    pub id: String,
    #[serde(with = "hour_format")]
    pub hour: NaiveTime,
    pub duration: u32,
}

#[cfg_attr(test, mockall::automock)]
pub trait ScheduleApi: Send + Sync {
    /// Days, rooms, slots and placed items of a conference
    fn fetch_schedule(&self, conference: &str) -> Result<Schedule, ApiError>;

    /// Items of a conference that have no slot
    fn fetch_unassigned(&self, conference: &str) -> Result<Vec<ScheduleItem>, ApiError>;

    fn update_slot(&self, input: &UpdateSlotInput) -> Result<Vec<UpdatedSlot>, ApiError>;

    /// Take an item off the grid
    fn move_item(&self, item_id: &str) -> Result<(), ApiError>;

    /// Append a slot of `duration` minutes to `day`
    fn add_slot(&self, conference: &str, day: NaiveDate, duration: u32) -> Result<(), ApiError>;
}
