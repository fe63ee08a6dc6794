//! Placement changes: assign, unassign and add-slot requests.
//!
//! Every successful mutation publishes the stale dependencies on the
//! invalidation bus. A failed mutation publishes nothing and hands the error
//! back so the caller can surface it.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::services::api::{ApiError, ScheduleApi, UpdateSlotInput};
use crate::services::dnd::DropOutcome;
use crate::services::invalidation::{InvalidationBus, QueryKey};

/// Slot lengths offered by the add-slot menu, in minutes.
pub const SLOT_DURATION_CHOICES: [u32; 5] = [15, 30, 45, 60, 90];

/// Mutation a drop resolved into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    UpdateSlot(UpdateSlotInput),
    MoveItem { item_id: String },
}

impl Mutation {
    pub fn from_outcome(outcome: &DropOutcome) -> Option<Self> {
        match outcome {
            DropOutcome::Assign {
                item,
                slot_id,
                room_id,
            } => Some(Mutation::UpdateSlot(UpdateSlotInput::for_drop(item, slot_id, room_id))),
            DropOutcome::Unassign { item } => Some(Mutation::MoveItem {
                item_id: item.id.clone(),
            }),
            DropOutcome::Cancelled => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Mutation::UpdateSlot(input) => format!("Assign item {} to slot {}", input.item_id, input.slot_id),
            Mutation::MoveItem { item_id } => format!("Unassign item {}", item_id),
        }
    }
}

#[derive(Clone)]
pub struct AssignmentService {
    api: Arc<dyn ScheduleApi>,
    bus: InvalidationBus,
}

impl AssignmentService {
    pub fn new(api: Arc<dyn ScheduleApi>, bus: InvalidationBus) -> Self {
        Self { api, bus }
    }

    pub fn run(&self, mutation: &Mutation) -> Result<(), ApiError> {
        match mutation {
            Mutation::UpdateSlot(input) => self.assign(input),
            Mutation::MoveItem { item_id } => self.unassign(item_id),
        }
    }

    /// Place an item. The unassigned list and the grid both go stale.
    pub fn assign(&self, input: &UpdateSlotInput) -> Result<(), ApiError> {
        match self.api.update_slot(input) {
            Ok(updated) => {
                log::info!(
                    "Assigned item {} to slot {} in rooms {:?} ({} slots updated)",
                    input.item_id,
                    input.slot_id,
                    input.rooms,
                    updated.len()
                );
                self.publish_placement_change();
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to assign item {}: {}", input.item_id, err);
                Err(err)
            }
        }
    }

    /// Take an item off the grid.
    pub fn unassign(&self, item_id: &str) -> Result<(), ApiError> {
        match self.api.move_item(item_id) {
            Ok(()) => {
                log::info!("Unassigned item {}", item_id);
                self.publish_placement_change();
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to unassign item {}: {}", item_id, err);
                Err(err)
            }
        }
    }

    pub fn add_slot(&self, conference: &str, day: NaiveDate, duration: u32) -> Result<(), ApiError> {
        match self.api.add_slot(conference, day, duration) {
            Ok(()) => {
                log::info!("Added {} minute slot to {}", duration, day);
                self.bus.publish(QueryKey::ConferenceSchedule);
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to add slot to {}: {}", day, err);
                Err(err)
            }
        }
    }

    fn publish_placement_change(&self) {
        self.bus.publish(QueryKey::UnassignedScheduleItems);
        self.bus.publish(QueryKey::ConferenceSchedule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule_item::ScheduleItem;
    use crate::services::api::MockScheduleApi;
    use mockall::predicate::{eq, function};

    fn service(api: MockScheduleApi) -> (AssignmentService, crate::services::invalidation::Subscription) {
        let bus = InvalidationBus::new();
        let subscription = bus.subscribe();
        (AssignmentService::new(Arc::new(api), bus), subscription)
    }

    #[test]
    fn test_assign_issues_one_update_and_invalidates() {
        let item = ScheduleItem::new("x", "Talk");
        let expected = UpdateSlotInput::for_drop(&item, "S", "R");

        let mut api = MockScheduleApi::new();
        api.expect_update_slot()
            .with(eq(expected.clone()))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        api.expect_move_item().never();

        let (service, mut subscription) = service(api);
        let outcome = DropOutcome::Assign {
            item,
            slot_id: "S".to_string(),
            room_id: "R".to_string(),
        };
        let mutation = Mutation::from_outcome(&outcome).unwrap();
        assert_eq!(mutation, Mutation::UpdateSlot(expected));

        service.run(&mutation).unwrap();
        assert!(subscription.drain().contains(&QueryKey::UnassignedScheduleItems));
    }

    #[test]
    fn test_unassign_issues_one_move_and_no_update() {
        let mut api = MockScheduleApi::new();
        api.expect_move_item()
            .with(function(|id: &str| id == "x"))
            .times(1)
            .returning(|_| Ok(()));
        api.expect_update_slot().never();

        let (service, mut subscription) = service(api);
        let outcome = DropOutcome::Unassign {
            item: ScheduleItem::new("x", "Talk"),
        };
        service.run(&Mutation::from_outcome(&outcome).unwrap()).unwrap();

        assert!(subscription.drain().contains(&QueryKey::UnassignedScheduleItems));
    }

    #[test]
    fn test_failed_mutation_publishes_nothing() {
        let mut api = MockScheduleApi::new();
        api.expect_update_slot()
            .times(1)
            .returning(|_| Err(ApiError::Graphql("Slot not found".to_string())));

        let (service, mut subscription) = service(api);
        let input = UpdateSlotInput::for_drop(&ScheduleItem::new("x", "T"), "S", "R");
        let err = service.assign(&input).unwrap_err();

        assert_eq!(err.to_string(), "Slot not found");
        assert!(subscription.drain().is_empty());
    }

    #[test]
    fn test_cancelled_drop_has_no_mutation() {
        assert_eq!(Mutation::from_outcome(&DropOutcome::Cancelled), None);
    }

    #[test]
    fn test_add_slot_refreshes_schedule_only() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 29).unwrap();
        let mut api = MockScheduleApi::new();
        api.expect_add_slot()
            .with(function(|code: &str| code == "pycon"), eq(day), eq(30))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (service, mut subscription) = service(api);
        service.add_slot("pycon", day, 30).unwrap();

        let keys = subscription.drain();
        assert!(keys.contains(&QueryKey::ConferenceSchedule));
        assert!(!keys.contains(&QueryKey::UnassignedScheduleItems));
    }
}
