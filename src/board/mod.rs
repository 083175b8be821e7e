//! The dashboard state: task records, per-task stopwatches, the focus
//! timer, journal, thoughts and sketches. Everything lives in process
//! memory for one session and is owned exclusively by the session loop.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use self::{
    countdown::{CountdownSession, PhaseEnd},
    journal::JournalBook,
    sketch::SketchPad,
    stopwatch::{StopwatchRegistry, TaskId},
    tasks::TaskStore,
    thoughts::ThoughtBoard,
};

pub mod countdown;
pub mod journal;
pub mod sketch;
pub mod stopwatch;
pub mod tasks;
pub mod thoughts;

/// Aggregate over the state regions. Methods here coordinate regions that
/// must move together; everything single-region lives on the store itself.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub tasks: TaskStore,
    pub stopwatches: StopwatchRegistry,
    pub countdown: CountdownSession,
    pub journal: JournalBook,
    pub thoughts: ThoughtBoard,
    pub sketches: SketchPad,
    /// The calendar day the views are scoped to.
    pub selected_date: NaiveDate,
    /// Wall clock as of the latest pulse, shown in the header.
    pub clock: DateTime<Local>,
}

impl Dashboard {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            tasks: TaskStore::new(),
            stopwatches: StopwatchRegistry::new(),
            countdown: CountdownSession::new(),
            journal: JournalBook::new(),
            thoughts: ThoughtBoard::new(),
            sketches: SketchPad::new(),
            selected_date: now.date_naive(),
            clock: now,
        }
    }

    /// Applies one tick-source pulse. The three time-dependent regions
    /// (wall clock, stopwatches, countdown) are independent; each advances
    /// atomically within this call.
    pub fn advance_second(&mut self, now: DateTime<Local>) -> Option<PhaseEnd> {
        self.clock = now;
        self.stopwatches.tick();
        self.countdown.tick()
    }

    /// Starts the stopwatch for an activity. Unknown ids are rejected so
    /// the registry never tracks orphan entries.
    pub fn start_stopwatch(&mut self, id: TaskId) -> bool {
        if self.tasks.activity(id).is_none() {
            return false;
        }
        self.stopwatches.start(id);
        true
    }

    /// Stops and flushes the stopwatch. The task store is the sole flush
    /// target, keeping activity totals single-writer.
    pub fn stop_stopwatch(&mut self, id: TaskId) {
        self.stopwatches.stop(id, &mut self.tasks);
    }

    /// Toggles activity completion. Completing an activity stops its
    /// stopwatch, so no timer keeps counting against a finished task.
    pub fn toggle_activity(&mut self, id: TaskId, now: DateTime<Local>) -> Option<bool> {
        let completed = self.tasks.toggle_activity(id, now)?;
        if completed {
            self.stopwatches.stop(id, &mut self.tasks);
        }
        Some(completed)
    }

    /// Deletes an activity and discards its stopwatch entry unflushed;
    /// there is no record left to receive the time.
    pub fn delete_activity(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.delete_activity(id);
        self.stopwatches.remove(id);
        removed
    }
}
