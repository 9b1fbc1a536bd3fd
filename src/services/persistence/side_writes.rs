//! Best-Effort Task Set
//!
//! Runs a set of independent side writes concurrently. A failure (or panic)
//! in one task never affects the others and is never propagated; each
//! outcome is logged and returned for inspection.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures_util::future::{join_all, BoxFuture};
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of one best-effort task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideWriteOutcome {
    pub task: String,
    pub succeeded: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// A named collection of fallible futures
#[derive(Default)]
pub struct BestEffortTasks<'a> {
    tasks: Vec<(&'static str, BoxFuture<'a, Result<(), String>>)>,
}

impl<'a> BestEffortTasks<'a> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn push<F>(&mut self, name: &'static str, task: F)
    where
        F: std::future::Future<Output = Result<(), String>> + Send + 'a,
    {
        self.tasks.push((name, Box::pin(task)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task to completion and collect outcomes in push order
    pub async fn run(self) -> Vec<SideWriteOutcome> {
        let runs = self.tasks.into_iter().map(|(name, task)| async move {
            let start = Instant::now();
            let result = match AssertUnwindSafe(task).catch_unwind().await {
                Ok(result) => result,
                Err(_) => Err("task panicked".to_string()),
            };
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(()) => {
                    debug!("Side write {} completed in {}ms", name, duration_ms);
                    SideWriteOutcome {
                        task: name.to_string(),
                        succeeded: true,
                        error: None,
                        duration_ms,
                    }
                }
                Err(e) => {
                    warn!("Side write {} failed after {}ms: {}", name, duration_ms, e);
                    SideWriteOutcome {
                        task: name.to_string(),
                        succeeded: false,
                        error: Some(e),
                        duration_ms,
                    }
                }
            }
        });

        join_all(runs).await
    }
}
