use std::{str::FromStr, sync::Arc};

use anyhow::anyhow;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use super::stopwatch::{TaskId, TimeSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" | "l" => Ok(Priority::Low),
            "med" | "medium" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(anyhow!("unknown priority {other:?}, expected low/med/high")),
        }
    }
}

/// A timed activity. `total_seconds` accumulates flushed stopwatch time and
/// is written only through the [TimeSink] impl on [TaskStore].
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: TaskId,
    pub text: Arc<str>,
    pub completed: bool,
    pub created_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
    pub total_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: TaskId,
    pub text: Arc<str>,
    pub completed: bool,
    pub created_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
    pub priority: Priority,
}

/// Holds the activity and to-do records for one session, newest first.
/// Records are scoped to calendar days through their creation timestamp.
#[derive(Debug, Serialize)]
pub struct TaskStore {
    activities: Vec<Activity>,
    todos: Vec<Todo>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            activities: Vec::new(),
            todos: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn take_id(&mut self) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds an activity. Blank text is rejected.
    pub fn add_activity(&mut self, text: &str, now: DateTime<Local>) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.take_id();
        self.activities.insert(
            0,
            Activity {
                id,
                text: text.into(),
                completed: false,
                created_at: now,
                completed_at: None,
                total_seconds: 0,
            },
        );
        Some(id)
    }

    /// Adds a to-do. Blank text is rejected.
    pub fn add_todo(
        &mut self,
        text: &str,
        priority: Priority,
        now: DateTime<Local>,
    ) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.take_id();
        self.todos.insert(
            0,
            Todo {
                id,
                text: text.into(),
                completed: false,
                created_at: now,
                completed_at: None,
                priority,
            },
        );
        Some(id)
    }

    /// Flips completion and stamps or clears `completed_at`. Returns the new
    /// completion state, or None for an unknown id.
    pub fn toggle_activity(&mut self, id: TaskId, now: DateTime<Local>) -> Option<bool> {
        let activity = self.activities.iter_mut().find(|a| a.id == id)?;
        activity.completed = !activity.completed;
        activity.completed_at = activity.completed.then_some(now);
        Some(activity.completed)
    }

    pub fn toggle_todo(&mut self, id: TaskId, now: DateTime<Local>) -> Option<bool> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        todo.completed_at = todo.completed.then_some(now);
        Some(todo.completed)
    }

    pub fn delete_activity(&mut self, id: TaskId) -> bool {
        let before = self.activities.len();
        self.activities.retain(|a| a.id != id);
        self.activities.len() != before
    }

    pub fn delete_todo(&mut self, id: TaskId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        self.todos.len() != before
    }

    pub fn activity(&self, id: TaskId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn activities_on(&self, date: NaiveDate) -> impl Iterator<Item = &Activity> {
        self.activities
            .iter()
            .filter(move |a| a.created_at.date_naive() == date)
    }

    pub fn todos_on(&self, date: NaiveDate) -> impl Iterator<Item = &Todo> {
        self.todos
            .iter()
            .filter(move |t| t.created_at.date_naive() == date)
    }
}

impl TimeSink for TaskStore {
    fn add_seconds(&mut self, task: TaskId, seconds: u64) {
        if let Some(activity) = self.activities.iter_mut().find(|a| a.id == task) {
            activity.total_seconds += seconds;
        }
    }
}
