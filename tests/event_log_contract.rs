//! EventLog contract: emptiness coupling, append/truncate symmetry, pending
//! commands, and lazy traversal.

use campus_quest::game::{EventLog, LocationId};

#[test]
fn empty_log_has_no_sequence() {
    let log = EventLog::new();
    assert!(log.is_empty());
    assert_eq!(log.sequence().count(), 0);
}

#[test]
fn add_add_remove_leaves_first_entry_with_no_pending_command() {
    let mut log = EventLog::new();
    log.add(LocationId(1), "L1", None);
    log.add(LocationId(2), "L2", Some("go north"));
    log.remove_last();

    let ids: Vec<u32> = log.sequence().map(|id| id.0).collect();
    assert_eq!(ids, vec![1]);

    let only = log.iter().next().unwrap();
    assert_eq!(only.next_command, None);
}

#[test]
fn adds_followed_by_equal_removes_return_to_empty() {
    let mut log = EventLog::new();
    for i in 0..10u32 {
        log.add(LocationId(i), "somewhere", Some("go east"));
    }
    assert!(!log.is_empty());

    for _ in 0..10 {
        log.remove_last();
    }
    assert!(log.is_empty());
    assert_eq!(log.sequence().count(), 0);

    // Still usable afterwards.
    log.add(LocationId(99), "again", None);
    let ids: Vec<u32> = log.sequence().map(|id| id.0).collect();
    assert_eq!(ids, vec![99]);
}

#[test]
fn every_non_last_entry_carries_exactly_one_pending_command() {
    let mut log = EventLog::new();
    log.add(LocationId(0), "A", None);
    log.add(LocationId(1), "B", Some("go east"));
    log.add(LocationId(2), "C", Some("go north"));
    log.add(LocationId(3), "D", Some("go up"));

    let entries: Vec<_> = log.iter().collect();
    for entry in &entries[..entries.len() - 1] {
        assert!(entry.next_command.is_some());
    }
    assert!(entries.last().unwrap().next_command.is_none());
}

#[test]
fn traversal_does_not_mutate_and_restarts_from_first() {
    let mut log = EventLog::new();
    log.add(LocationId(4), "A", None);
    log.add(LocationId(5), "B", Some("go west"));

    let before = log.clone();
    let pass_one: Vec<LocationId> = log.sequence().collect();
    let pass_two: Vec<LocationId> = log.sequence().collect();

    assert_eq!(pass_one, pass_two);
    assert_eq!(log, before);
}

#[test]
fn remove_last_on_empty_is_a_no_op() {
    let mut log = EventLog::new();
    log.remove_last();
    assert!(log.is_empty());
}
