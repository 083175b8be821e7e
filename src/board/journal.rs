use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

const UNTITLED: &str = "Untitled Entry";

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// The dashboard date the entry was written under, which is not
    /// necessarily the day it was created.
    pub date: NaiveDate,
    pub created_at: DateTime<Local>,
}

/// Journal entries for one session, newest first.
#[derive(Debug, Serialize)]
pub struct JournalBook {
    entries: Vec<JournalEntry>,
    next_id: u64,
}

impl Default for JournalBook {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl JournalBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves an entry under `date`. With both title and content blank there
    /// is nothing to keep and the call is a no-op; a blank title alone
    /// falls back to a placeholder.
    pub fn save(
        &mut self,
        title: &str,
        content: &str,
        date: NaiveDate,
        now: DateTime<Local>,
    ) -> Option<u64> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() && content.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            0,
            JournalEntry {
                id,
                title: if title.is_empty() {
                    UNTITLED.to_string()
                } else {
                    title.to_string()
                },
                content: content.to_string(),
                date,
                created_at: now,
            },
        );
        Some(id)
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(move |e| e.date == date)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_content_chars(&self) -> usize {
        self.entries.iter().map(|e| e.content.chars().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn blank_save_is_a_noop_and_blank_title_gets_a_placeholder() {
        let mut book = JournalBook::new();
        assert_eq!(book.save("  ", "", day(2), noon()), None);
        assert!(book.is_empty());

        let id = book.save("", "long day", day(2), noon()).unwrap();
        let entry = book.entries_on(day(2)).find(|e| e.id == id).unwrap();
        assert_eq!(entry.title, "Untitled Entry");
        assert_eq!(entry.content, "long day");
    }

    #[test]
    fn entries_are_scoped_to_their_dashboard_date() {
        let mut book = JournalBook::new();
        book.save("a", "about monday", day(2), noon()).unwrap();
        book.save("b", "backfilled", day(1), noon()).unwrap();

        assert_eq!(book.entries_on(day(1)).count(), 1);
        assert_eq!(book.entries_on(day(2)).count(), 1);
        assert_eq!(book.entries_on(day(3)).count(), 0);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn delete_removes_by_id() {
        let mut book = JournalBook::new();
        let id = book.save("a", "text", day(2), noon()).unwrap();
        assert!(book.delete(id));
        assert!(!book.delete(id));
        assert!(book.is_empty());
    }
}
