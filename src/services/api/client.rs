use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::queries;
use super::{ApiError, ScheduleApi, UpdateSlotInput, UpdatedSlot};
use crate::models::day::Schedule;
use crate::models::schedule_item::ScheduleItem;
use crate::models::settings::AppConfig;

/// Blocking GraphQL client; call it off the UI thread.
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
        })
    }

    fn execute<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        });

        log::debug!("POST {} ({})", self.endpoint, operation);
        let response = self.client.post(&self.endpoint).json(&body).send()?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} failed with HTTP status {}", operation, status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let text = response.text()?;
        decode_response(&text)
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// Unwrap a GraphQL response envelope, turning `errors` into [`ApiError::Graphql`].
pub(crate) fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: GraphqlResponse<T> = serde_json::from_str(body)?;

    if !envelope.errors.is_empty() {
        let messages = envelope
            .errors
            .into_iter()
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::Graphql(messages));
    }

    envelope.data.ok_or(ApiError::MissingData("data"))
}

/// Union result of the schedule mutations: either a `...Error` type with a
/// message, or a success type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MutationOutcome {
    #[serde(rename = "__typename")]
    typename: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    updated_slots: Vec<UpdatedSlot>,
}

impl MutationOutcome {
    pub(crate) fn into_result(self) -> Result<Vec<UpdatedSlot>, ApiError> {
        if self.typename.ends_with("Error") {
            return Err(ApiError::Graphql(
                self.message.unwrap_or_else(|| self.typename.clone()),
            ));
        }
        Ok(self.updated_slots)
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleData {
    conference: Option<Schedule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnassignedConference {
    #[serde(default)]
    unassigned_schedule_items: Vec<ScheduleItem>,
}

#[derive(Debug, Deserialize)]
struct UnassignedData {
    conference: Option<UnassignedConference>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSlotData {
    update_or_create_slot_item: MutationOutcome,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveItemData {
    move_schedule_item: MutationOutcome,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddSlotData {
    add_schedule_slot: MutationOutcome,
}

impl ScheduleApi for GraphqlClient {
    fn fetch_schedule(&self, conference: &str) -> Result<Schedule, ApiError> {
        let data: ScheduleData = self.execute(
            "ConferenceSchedule",
            &queries::with_item_fragment(queries::CONFERENCE_SCHEDULE),
            json!({ "code": conference }),
        )?;
        data.conference.ok_or(ApiError::MissingData("conference"))
    }

    fn fetch_unassigned(&self, conference: &str) -> Result<Vec<ScheduleItem>, ApiError> {
        let data: UnassignedData = self.execute(
            "UnassignedScheduleItems",
            &queries::with_item_fragment(queries::UNASSIGNED_SCHEDULE_ITEMS),
            json!({ "code": conference }),
        )?;
        data.conference
            .map(|conference| conference.unassigned_schedule_items)
            .ok_or(ApiError::MissingData("conference"))
    }

    fn update_slot(&self, input: &UpdateSlotInput) -> Result<Vec<UpdatedSlot>, ApiError> {
        let data: UpdateSlotData =
            self.execute("UpdateSlot", queries::UPDATE_SLOT, json!({ "input": input }))?;
        data.update_or_create_slot_item.into_result()
    }

    fn move_item(&self, item_id: &str) -> Result<(), ApiError> {
        let data: MoveItemData =
            self.execute("MoveItem", queries::MOVE_ITEM, json!({ "itemId": item_id }))?;
        data.move_schedule_item.into_result().map(|_| ())
    }

    fn add_slot(&self, conference: &str, day: NaiveDate, duration: u32) -> Result<(), ApiError> {
        let data: AddSlotData = self.execute(
            "AddScheduleSlot",
            queries::ADD_SLOT,
            json!({
                "conference": conference,
                "duration": duration,
                "day": day.format("%Y-%m-%d").to_string(),
            }),
        )?;
        data.add_schedule_slot.into_result().map(|_| ())
    }
}
