//! Background requests for the UI thread.
//!
//! Blocking API calls run on a small tokio pool; their results come back over
//! a channel that the app drains at the start of every frame.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::day::Schedule;
use crate::models::schedule_item::ScheduleItem;
use crate::services::api::ApiError;
use crate::services::assignment::Mutation;
use crate::services::board::CellKey;

const WORKER_THREADS: usize = 2;

#[derive(Debug)]
pub enum TaskResult {
    Schedule(Result<Schedule, ApiError>),
    Unassigned(Result<Vec<ScheduleItem>, ApiError>),
    Mutation {
        mutation: Mutation,
        cell: Option<CellKey>,
        result: Result<(), ApiError>,
    },
    SlotAdded {
        day: NaiveDate,
        duration: u32,
        result: Result<(), ApiError>,
    },
}

pub struct TaskRunner {
    runtime: Runtime,
    sender: UnboundedSender<TaskResult>,
    receiver: UnboundedReceiver<TaskResult>,
    repaint: Option<egui::Context>,
}

impl TaskRunner {
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(WORKER_THREADS)
            .thread_name("schedule-api")
            .enable_all()
            .build()
            .context("Failed to start background runtime")?;
        let (sender, receiver) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            sender,
            receiver,
            repaint: None,
        })
    }

    /// Wake the UI whenever a task finishes.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();

        self.runtime.spawn_blocking(move || {
            if sender.send(job()).is_err() {
                log::debug!("Task finished after the app shut down");
                return;
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Results finished since the last call, in completion order.
    pub fn drain(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(runner: &mut TaskRunner, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(runner.drain());
            std::thread::sleep(Duration::from_millis(5));
        }
        results
    }

    #[test]
    fn test_results_come_back_on_drain() {
        let mut runner = TaskRunner::new().unwrap();
        runner.spawn(|| TaskResult::Unassigned(Ok(vec![ScheduleItem::new("a", "Talk")])));
        runner.spawn(|| TaskResult::Schedule(Err(ApiError::Status(502))));

        let results = wait_for(&mut runner, 2);
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .any(|r| matches!(r, TaskResult::Unassigned(Ok(items)) if items.len() == 1)));
        assert!(results
            .iter()
            .any(|r| matches!(r, TaskResult::Schedule(Err(ApiError::Status(502))))));
    }

    #[test]
    fn test_drain_is_empty_without_tasks() {
        let mut runner = TaskRunner::new().unwrap();
        assert!(runner.drain().is_empty());
    }
}
