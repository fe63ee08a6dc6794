//! Cache invalidation for named data dependencies.
//!
//! Mutations publish the keys they make stale; views hold a subscription and
//! re-request whatever keys they drain on their next frame.

use std::collections::HashSet;
use std::fmt;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    UnassignedScheduleItems,
    ConferenceSchedule,
}

impl QueryKey {
    pub const ALL: [QueryKey; 2] = [QueryKey::UnassignedScheduleItems, QueryKey::ConferenceSchedule];

    /// Operation name of the query this key refreshes
    pub fn name(&self) -> &'static str {
        match self {
            QueryKey::UnassignedScheduleItems => "UnassignedScheduleItems",
            QueryKey::ConferenceSchedule => "ConferenceSchedule",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<QueryKey>,
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Mark `key` stale for every subscriber. Returns how many were notified.
    pub fn publish(&self, key: QueryKey) -> usize {
        log::debug!("Invalidating {}", key);
        self.sender.send(key).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }
}

#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<QueryKey>,
}

impl Subscription {
    /// Collect every key published since the last drain without blocking.
    /// A lagged receiver has lost messages, so it reports everything stale.
    pub fn drain(&mut self) -> HashSet<QueryKey> {
        let mut keys = HashSet::new();
        loop {
            match self.receiver.try_recv() {
                Ok(key) => {
                    keys.insert(key);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("Invalidation subscriber lagged by {} messages", skipped);
                    keys.extend(QueryKey::ALL);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        keys
    }
}
