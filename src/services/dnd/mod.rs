//! Drag-and-drop, independent of any gesture library.
//!
//! Views register draggables and drop targets through [`DragDropBackend`]
//! every frame. [`DragSession`] tracks which payload is in flight and which
//! target is hovered, and turns a release into a [`DropOutcome`].

use std::collections::HashMap;

use crate::models::schedule_item::ScheduleItem;

/// Type tag matched between payloads and targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    Item,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A placed item, dragged from its grid cell
    Grid { slot_id: String },
    /// An unassigned item, dragged from the side panel
    Tray,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub kind: DragKind,
    pub item: ScheduleItem,
    pub source: DragSource,
}

impl DragPayload {
    pub fn from_grid(item: &ScheduleItem, slot_id: &str) -> Self {
        Self {
            kind: DragKind::Item,
            item: item.clone(),
            source: DragSource::Grid {
                slot_id: slot_id.to_string(),
            },
        }
    }

    pub fn from_tray(item: &ScheduleItem) -> Self {
        Self {
            kind: DragKind::Item,
            item: item.clone(),
            source: DragSource::Tray,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Placeholder { slot_id: String, room_id: String },
    Tray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropHandle(u64);

/// What a release means for the schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Assign {
        item: ScheduleItem,
        slot_id: String,
        room_id: String,
    },
    Unassign {
        item: ScheduleItem,
    },
    Cancelled,
}

pub trait DragDropBackend {
    fn make_draggable(&mut self, payload: DragPayload) -> DragHandle;

    fn make_drop_target(&mut self, accepts: &[DragKind], target: DropTarget) -> DropHandle;
}

/// Decide what dropping `payload` on `target` does.
pub fn resolve_drop(payload: &DragPayload, target: &DropTarget) -> DropOutcome {
    match (target, &payload.source) {
        (DropTarget::Placeholder { slot_id, room_id }, _) => DropOutcome::Assign {
            item: payload.item.clone(),
            slot_id: slot_id.clone(),
            room_id: room_id.clone(),
        },
        (DropTarget::Tray, DragSource::Grid { .. }) => DropOutcome::Unassign {
            item: payload.item.clone(),
        },
        (DropTarget::Tray, DragSource::Tray) => DropOutcome::Cancelled,
    }
}

#[derive(Debug, Clone)]
struct RegisteredTarget {
    accepts: Vec<DragKind>,
    target: DropTarget,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    payload: DragPayload,
    hovered: Option<DropTarget>,
}

#[derive(Debug, Default)]
pub struct DragSession {
    next_id: u64,
    draggables: HashMap<DragHandle, DragPayload>,
    targets: HashMap<DropHandle, RegisteredTarget>,
    active: Option<ActiveDrag>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget this frame's registrations; an in-flight drag survives.
    pub fn begin_frame(&mut self) {
        self.draggables.clear();
        self.targets.clear();
    }

    pub fn begin(&mut self, handle: DragHandle) -> bool {
        let Some(payload) = self.draggables.get(&handle).cloned() else {
            return false;
        };
        log::debug!("Drag started for item {}", payload.item.id);
        self.active = Some(ActiveDrag {
            payload,
            hovered: None,
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.active.as_ref().map(|active| &active.payload)
    }

    /// True when the draggable behind `handle` carries the item being dragged.
    pub fn is_dragging(&self, handle: DragHandle) -> bool {
        match (self.payload(), self.draggables.get(&handle)) {
            (Some(active), Some(payload)) => {
                active.item.id == payload.item.id && active.source == payload.source
            }
            _ => false,
        }
    }

    /// Whether the in-flight payload would be accepted by `handle`.
    pub fn can_drop(&self, handle: DropHandle) -> bool {
        match (self.payload(), self.targets.get(&handle)) {
            (Some(payload), Some(registered)) => registered.accepts.contains(&payload.kind),
            _ => false,
        }
    }

    /// Point the pointer at `handle`, or at nothing.
    pub fn hover(&mut self, handle: Option<DropHandle>) {
        let target = handle
            .and_then(|handle| self.targets.get(&handle))
            .map(|registered| registered.target.clone());
        if let Some(active) = self.active.as_mut() {
            active.hovered = target;
        }
    }

    pub fn is_over(&self, handle: DropHandle) -> bool {
        match (self.active.as_ref(), self.targets.get(&handle)) {
            (Some(active), Some(registered)) => active.hovered.as_ref() == Some(&registered.target),
            _ => false,
        }
    }

    /// End the drag at the hovered target.
    pub fn release(&mut self) -> DropOutcome {
        let Some(active) = self.active.take() else {
            return DropOutcome::Cancelled;
        };
        let Some(target) = active.hovered else {
            return DropOutcome::Cancelled;
        };

        let accepted = self
            .targets
            .values()
            .find(|registered| registered.target == target)
            .map(|registered| registered.accepts.contains(&active.payload.kind))
            .unwrap_or(false);
        if !accepted {
            log::debug!("Drop target {:?} does not accept {:?}", target, active.payload.kind);
            return DropOutcome::Cancelled;
        }

        resolve_drop(&active.payload, &target)
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl DragDropBackend for DragSession {
    fn make_draggable(&mut self, payload: DragPayload) -> DragHandle {
        let handle = DragHandle(self.next_id());
        self.draggables.insert(handle, payload);
        handle
    }

    fn make_drop_target(&mut self, accepts: &[DragKind], target: DropTarget) -> DropHandle {
        let handle = DropHandle(self.next_id());
        self.targets.insert(
            handle,
            RegisteredTarget {
                accepts: accepts.to_vec(),
                target,
            },
        );
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn placeholder(slot: &str, room: &str) -> DropTarget {
        DropTarget::Placeholder {
            slot_id: slot.to_string(),
            room_id: room.to_string(),
        }
    }

    #[test]
    fn test_tray_item_dropped_on_placeholder_assigns() {
        let mut session = DragSession::new();
        let item = ScheduleItem::new("x", "Talk");
        let drag = session.make_draggable(DragPayload::from_tray(&item));
        let cell = session.make_drop_target(&[DragKind::Item], placeholder("s1", "r1"));

        assert!(session.begin(drag));
        assert!(session.can_drop(cell));
        session.hover(Some(cell));
        assert!(session.is_over(cell));

        assert_eq!(
            session.release(),
            DropOutcome::Assign {
                item,
                slot_id: "s1".to_string(),
                room_id: "r1".to_string(),
            }
        );
        assert!(!session.is_active());
    }

    #[test]
    fn test_grid_item_dropped_on_tray_unassigns() {
        let mut session = DragSession::new();
        let item = ScheduleItem::new("x", "Talk");
        let drag = session.make_draggable(DragPayload::from_grid(&item, "s1"));
        let tray = session.make_drop_target(&[DragKind::Item], DropTarget::Tray);

        session.begin(drag);
        session.hover(Some(tray));
        assert_eq!(session.release(), DropOutcome::Unassign { item });
    }

    #[test]
    fn test_tray_item_dropped_back_on_tray_is_noop() {
        let mut session = DragSession::new();
        let item = ScheduleItem::new("x", "Talk");
        let drag = session.make_draggable(DragPayload::from_tray(&item));
        let tray = session.make_drop_target(&[DragKind::Item], DropTarget::Tray);

        session.begin(drag);
        session.hover(Some(tray));
        assert_eq!(session.release(), DropOutcome::Cancelled);
    }

    #[test]
    fn test_release_outside_targets_cancels() {
        let mut session = DragSession::new();
        let drag = session.make_draggable(DragPayload::from_tray(&ScheduleItem::new("x", "T")));
        let cell = session.make_drop_target(&[DragKind::Item], placeholder("s", "r"));

        session.begin(drag);
        session.hover(Some(cell));
        session.hover(None);
        assert_eq!(session.release(), DropOutcome::Cancelled);
    }

    #[test]
    fn test_target_without_matching_kind_refuses() {
        let mut session = DragSession::new();
        let drag = session.make_draggable(DragPayload::from_tray(&ScheduleItem::new("x", "T")));
        let cell = session.make_drop_target(&[], placeholder("s", "r"));

        session.begin(drag);
        assert!(!session.can_drop(cell));
        session.hover(Some(cell));
        assert_eq!(session.release(), DropOutcome::Cancelled);
    }

    #[test]
    fn test_drag_survives_frame_reset() {
        let mut session = DragSession::new();
        let item = ScheduleItem::new("x", "T");
        let drag = session.make_draggable(DragPayload::from_grid(&item, "s1"));
        session.begin(drag);

        session.begin_frame();
        let again = session.make_draggable(DragPayload::from_grid(&item, "s1"));
        let other = session.make_draggable(DragPayload::from_tray(&ScheduleItem::new("y", "U")));
        assert!(session.is_active());
        assert!(session.is_dragging(again));
        assert!(!session.is_dragging(other));
    }

    #[test]
    fn test_begin_with_stale_handle_fails() {
        let mut session = DragSession::new();
        let drag = session.make_draggable(DragPayload::from_tray(&ScheduleItem::new("x", "T")));
        session.begin_frame();
        assert!(!session.begin(drag));
        assert!(!session.is_active());
    }

    #[test]
    fn test_cancel_clears_drag() {
        let mut session = DragSession::new();
        let drag = session.make_draggable(DragPayload::from_tray(&ScheduleItem::new("x", "T")));
        session.begin(drag);
        session.cancel();
        assert_eq!(session.release(), DropOutcome::Cancelled);
    }
}
