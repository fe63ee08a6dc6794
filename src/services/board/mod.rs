//! Client-side state of the schedule board.
//!
//! Holds what the server last reported (schedule and unassigned items) and
//! the short-lived UI state around it. Nothing here changes placements
//! locally; the board only changes by re-fetching after a mutation.

pub mod placeholder;
pub mod tray;

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::day::{Day, Schedule};
use crate::models::schedule_item::ScheduleItem;
use crate::services::layout::{compute_day_layout, DayLayout};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub slot_id: String,
    pub room_id: String,
}

impl CellKey {
    pub fn new(slot_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            room_id: room_id.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BoardState {
    pub schedule: LoadState<Schedule>,
    pub unassigned: LoadState<Vec<ScheduleItem>>,
    selected_day: usize,
    layout: Option<DayLayout>,
    /// Outstanding requests per cell; two drops on one cell count twice.
    in_flight: HashMap<CellKey, usize>,
    unassigning: HashMap<String, usize>,
}

fn acquire<K: Eq + Hash>(counts: &mut HashMap<K, usize>, key: K) {
    *counts.entry(key).or_default() += 1;
}

fn release<K, Q>(counts: &mut HashMap<K, usize>, key: &Q)
where
    K: Eq + Hash + std::borrow::Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    if let Some(count) = counts.get_mut(key) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            counts.remove(key);
        }
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_schedule(&mut self, schedule: LoadState<Schedule>) {
        self.schedule = schedule;
        if let Some(loaded) = self.schedule.loaded() {
            if self.selected_day >= loaded.days.len() {
                self.selected_day = 0;
            }
        }
        self.layout = None;
    }

    /// Keep the previous list visible while a refetch is running.
    pub fn mark_unassigned_loading(&mut self) {
        if self.unassigned.loaded().is_none() {
            self.unassigned = LoadState::Loading;
        }
    }

    pub fn mark_schedule_loading(&mut self) {
        if self.schedule.loaded().is_none() {
            self.schedule = LoadState::Loading;
        }
    }

    pub fn selected_day_index(&self) -> usize {
        self.selected_day
    }

    pub fn select_day(&mut self, index: usize) {
        if index != self.selected_day {
            self.selected_day = index;
            self.layout = None;
        }
    }

    pub fn selected_day(&self) -> Option<&Day> {
        self.schedule.loaded().and_then(|schedule| schedule.day(self.selected_day))
    }

    /// Layout of the selected day, recomputed only when the schedule or the
    /// selected day changed.
    pub fn layout(&mut self) -> Option<&DayLayout> {
        if self.layout.is_none() {
            let layout = self.selected_day().map(compute_day_layout);
            self.layout = layout;
        }
        self.layout.as_ref()
    }

    pub fn begin_assignment(&mut self, cell: CellKey) {
        acquire(&mut self.in_flight, cell);
    }

    pub fn finish_assignment(&mut self, cell: &CellKey) {
        release(&mut self.in_flight, cell);
    }

    pub fn is_in_flight(&self, cell: &CellKey) -> bool {
        self.in_flight.contains_key(cell)
    }

    pub fn begin_unassignment(&mut self, item_id: &str) {
        acquire(&mut self.unassigning, item_id.to_string());
    }

    pub fn finish_unassignment(&mut self, item_id: &str) {
        release(&mut self.unassigning, item_id);
    }

    pub fn is_unassigning(&self, item_id: &str) -> bool {
        self.unassigning.contains_key(item_id)
    }

    pub fn has_pending_mutations(&self) -> bool {
        !self.in_flight.is_empty() || !self.unassigning.is_empty()
    }
}
