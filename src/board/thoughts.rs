use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// Sticky-note tints, assigned round-robin so tests stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
}

const PALETTE: [NoteColor; 5] = [
    NoteColor::Yellow,
    NoteColor::Blue,
    NoteColor::Green,
    NoteColor::Pink,
    NoteColor::Purple,
];

#[derive(Debug, Clone, Serialize)]
pub struct Thought {
    pub id: u64,
    pub content: String,
    pub created_at: DateTime<Local>,
    pub color: NoteColor,
}

/// Freeform thought capture, newest first.
#[derive(Debug, Serialize)]
pub struct ThoughtBoard {
    thoughts: Vec<Thought>,
    next_id: u64,
}

impl Default for ThoughtBoard {
    fn default() -> Self {
        Self {
            thoughts: Vec::new(),
            next_id: 1,
        }
    }
}

impl ThoughtBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures a thought. Blank content is rejected.
    pub fn add(&mut self, content: &str, now: DateTime<Local>) -> Option<u64> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.thoughts.insert(
            0,
            Thought {
                id,
                content: content.to_string(),
                created_at: now,
                color: PALETTE[(id as usize - 1) % PALETTE.len()],
            },
        );
        Some(id)
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.thoughts.len();
        self.thoughts.retain(|t| t.id != id);
        self.thoughts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter()
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.thoughts
            .iter()
            .filter(|t| t.created_at.date_naive() == date)
            .count()
    }

    pub fn total_content_chars(&self) -> usize {
        self.thoughts
            .iter()
            .map(|t| t.content.chars().count())
            .sum()
    }
}
