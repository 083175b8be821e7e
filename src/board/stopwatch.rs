use std::collections::HashMap;

use serde::Serialize;

pub type TaskId = u64;

/// Write path for flushed stopwatch time. [StopwatchRegistry::stop] is the
/// only caller, which keeps task totals single-writer.
#[cfg_attr(test, mockall::automock)]
pub trait TimeSink {
    fn add_seconds(&mut self, task: TaskId, seconds: u64);
}

#[derive(Debug, Clone, Copy, Serialize)]
struct StopwatchEntry {
    active: bool,
    elapsed_seconds: u64,
}

/// Per-task elapsed-time counters with start/stop semantics. Time counted
/// here is unflushed: it only reaches the owning task record when the
/// stopwatch is stopped. A flushed, inactive entry is indistinguishable
/// from absence, so `stop` prunes entries instead of zeroing them.
#[derive(Debug, Default, Serialize)]
pub struct StopwatchRegistry {
    entries: HashMap<TaskId, StopwatchEntry>,
}

impl StopwatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the stopwatch for `task` running, creating it at zero if
    /// absent. Restarting a running stopwatch keeps its unflushed time.
    pub fn start(&mut self, task: TaskId) {
        let entry = self.entries.entry(task).or_insert(StopwatchEntry {
            active: false,
            elapsed_seconds: 0,
        });
        entry.active = true;
    }

    /// Stops the stopwatch for `task` and flushes its elapsed time into
    /// `sink`. No-op when no entry exists, so repeated stops never
    /// double-count.
    pub fn stop(&mut self, task: TaskId, sink: &mut dyn TimeSink) {
        if let Some(entry) = self.entries.remove(&task) {
            if entry.elapsed_seconds > 0 {
                sink.add_seconds(task, entry.elapsed_seconds);
            }
        }
    }

    /// Advances every running stopwatch by one second. Called once per
    /// tick-source pulse.
    pub fn tick(&mut self) {
        for entry in self.entries.values_mut() {
            if entry.active {
                entry.elapsed_seconds += 1;
            }
        }
    }

    /// Discards the entry without flushing. Used when the owning task is
    /// deleted and there is no record left to flush into.
    pub fn remove(&mut self, task: TaskId) {
        self.entries.remove(&task);
    }

    pub fn elapsed_for(&self, task: TaskId) -> u64 {
        self.entries
            .get(&task)
            .map(|entry| entry.elapsed_seconds)
            .unwrap_or(0)
    }

    pub fn is_active(&self, task: TaskId) -> bool {
        self.entries
            .get(&task)
            .map(|entry| entry.active)
            .unwrap_or(false)
    }
}
