//! Ordered history of visited locations, kept as a doubly-linked list inside
//! an index-addressed arena. Supports append, truncate-last, and lazy
//! traversal for replay and audit.

use serde::{Deserialize, Serialize};

use crate::game::types::LocationId;

/// One node in the history. `next_command` is the command that led to the
/// *next* entry; the current last entry never carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub location: LocationId,
    pub description: String,
    pub next_command: Option<String>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Append-only-but-truncatable event history.
///
/// Invariants: the list is either fully empty (`first` and `last` both
/// `None`) or has exactly one head with no predecessor and one tail with no
/// successor, and every non-last entry carries exactly one pending command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<EventEntry>,
    first: Option<usize>,
    last: Option<usize>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append an entry for an arrival at `location`. `arrival_command` is
    /// the command that produced the arrival and is recorded on the previous
    /// entry; it is ignored for the very first entry.
    pub fn add(&mut self, location: LocationId, description: &str, arrival_command: Option<&str>) {
        let index = self.entries.len();
        let entry = EventEntry {
            location,
            description: description.to_string(),
            next_command: None,
            prev: self.last,
            next: None,
        };

        match self.last {
            None => {
                self.entries.push(entry);
                self.first = Some(index);
                self.last = Some(index);
            }
            Some(old_last) => {
                self.entries.push(entry);
                self.entries[old_last].next = Some(index);
                self.entries[old_last].next_command =
                    arrival_command.map(|command| command.to_string());
                self.last = Some(index);
            }
        }
    }

    /// Sever and discard the last entry. No-op when empty. The new last
    /// entry (if any) has its pending command cleared.
    pub fn remove_last(&mut self) {
        let Some(last) = self.last else {
            return;
        };

        if self.first == self.last {
            self.entries.clear();
            self.first = None;
            self.last = None;
            return;
        }

        let new_last = self.entries[last].prev.expect("non-head entry has a predecessor");
        self.entries[new_last].next = None;
        self.entries[new_last].next_command = None;
        self.last = Some(new_last);
        self.entries.pop();
    }

    /// Lazy first-to-last traversal of visited location ids. Restartable;
    /// never mutates the log.
    pub fn sequence(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.iter().map(|entry| entry.location)
    }

    /// Lazy first-to-last traversal of full entries.
    pub fn iter(&self) -> EventIter<'_> {
        EventIter {
            log: self,
            cursor: self.first,
        }
    }
}

/// Iterator over the log, following the forward links.
pub struct EventIter<'a> {
    log: &'a EventLog,
    cursor: Option<usize>,
}

impl<'a> Iterator for EventIter<'a> {
    type Item = &'a EventEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let entry = &self.log.entries[index];
        self.cursor = entry.next;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(log: &EventLog) -> Vec<u32> {
        log.sequence().map(|id| id.0).collect()
    }

    #[test]
    fn new_log_is_empty() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(ids(&log), Vec::<u32>::new());
    }

    #[test]
    fn add_links_entries_and_records_commands() {
        let mut log = EventLog::new();
        log.add(LocationId(1), "Location 1", None);
        log.add(LocationId(2), "Location 2", Some("go north"));
        log.add(LocationId(3), "Location 3", Some("go east"));

        assert_eq!(ids(&log), vec![1, 2, 3]);

        let commands: Vec<Option<&str>> =
            log.iter().map(|e| e.next_command.as_deref()).collect();
        assert_eq!(commands, vec![Some("go north"), Some("go east"), None]);
    }

    #[test]
    fn remove_last_truncates_and_clears_pending_command() {
        let mut log = EventLog::new();
        log.remove_last(); // no-op on empty
        assert!(log.is_empty());

        log.add(LocationId(1), "Location 1", None);
        log.add(LocationId(2), "Location 2", Some("go north"));
        log.remove_last();

        assert_eq!(ids(&log), vec![1]);
        assert_eq!(log.iter().next().unwrap().next_command, None);

        log.remove_last();
        assert!(log.is_empty());
    }

    #[test]
    fn equal_adds_and_removes_return_to_empty() {
        let mut log = EventLog::new();
        for i in 0..5 {
            log.add(LocationId(i), "somewhere", Some("go west"));
        }
        for _ in 0..5 {
            log.remove_last();
        }
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn sequence_is_restartable() {
        let mut log = EventLog::new();
        log.add(LocationId(7), "A", None);
        log.add(LocationId(8), "B", Some("go up"));

        let first_pass: Vec<u32> = log.sequence().map(|id| id.0).collect();
        let second_pass: Vec<u32> = log.sequence().map(|id| id.0).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass, vec![7, 8]);
    }
}
