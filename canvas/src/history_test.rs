use super::*;
use crate::doc::{Circle, Snapshot, TextBox};
use crate::viewport::Point;

fn entry(n: u32) -> HistoryEntry {
    HistoryEntry {
        snapshot: Some(Snapshot::new(format!("snap-{n}"))),
        text_boxes: vec![TextBox::new(Point::new(f64::from(n), 0.0))],
        circles: vec![Circle { x: 0.0, y: 0.0, radius: f64::from(n), color: "#000".into() }],
    }
}

fn history_with(n: u32) -> History {
    let mut h = History::default();
    for i in 1..=n {
        assert!(h.checkpoint(entry(i)));
    }
    h
}

// =============================================================
// Basics
// =============================================================

#[test]
fn new_history_is_empty() {
    let h = History::default();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(h.current().is_none());
}

#[test]
fn undo_on_empty_is_noop() {
    let mut h = History::default();
    assert!(h.undo().is_none());
    assert_eq!(h.redo_len(), 0);
}

#[test]
fn redo_on_empty_is_noop() {
    let mut h = history_with(2);
    assert!(h.redo().is_none());
    assert_eq!(h.undo_len(), 2);
}

#[test]
fn undo_restores_previous_top() {
    let mut h = history_with(3);
    assert_eq!(h.undo(), Some(entry(2)));
    assert_eq!(h.current(), Some(&entry(2)));
}

#[test]
fn undo_last_entry_restores_empty_state() {
    let mut h = history_with(1);
    assert_eq!(h.undo(), Some(HistoryEntry::default()));
    assert!(!h.can_undo());
    assert!(h.can_redo());
}

#[test]
fn redo_restores_undone_entry() {
    let mut h = history_with(2);
    h.undo();
    assert_eq!(h.redo(), Some(entry(2)));
    assert_eq!(h.current(), Some(&entry(2)));
    assert!(!h.can_redo());
}

// =============================================================
// Properties
// =============================================================

#[test]
fn undo_k_then_redo_k_restores_state() {
    for n in 1..=6 {
        for k in 0..=n {
            let mut h = history_with(n);
            let before = h.current().cloned();
            for _ in 0..k {
                assert!(h.undo().is_some());
            }
            let mut last = None;
            for _ in 0..k {
                last = h.redo();
            }
            if k > 0 {
                assert_eq!(last, before, "n={n} k={k}");
            }
            assert_eq!(h.current().cloned(), before, "n={n} k={k}");
            assert_eq!(h.undo_len(), n as usize);
            assert_eq!(h.redo_len(), 0);
        }
    }
}

#[test]
fn checkpoint_after_undo_clears_redo() {
    let mut h = history_with(3);
    h.undo();
    h.undo();
    assert_eq!(h.redo_len(), 2);
    assert!(h.checkpoint(entry(9)));
    assert!(!h.can_redo());
    assert!(h.redo().is_none());
    assert_eq!(h.current(), Some(&entry(9)));
}

#[test]
fn duplicate_checkpoint_is_skipped() {
    let mut h = history_with(2);
    h.undo();
    assert!(!h.checkpoint(entry(1)));
    assert_eq!(h.undo_len(), 1);
    assert!(!h.can_redo(), "a skipped checkpoint still ends forward history");
    assert!(h.redo().is_none());
}

#[test]
fn history_is_bounded_and_drops_oldest() {
    let mut h = History::new(3);
    for i in 1..=5 {
        h.checkpoint(entry(i));
    }
    assert_eq!(h.undo_len(), 3);
    assert_eq!(h.undo(), Some(entry(4)));
    assert_eq!(h.undo(), Some(entry(3)));
    assert_eq!(h.undo(), Some(HistoryEntry::default()));
}

#[test]
fn zero_capacity_still_keeps_current() {
    let mut h = History::new(0);
    h.checkpoint(entry(1));
    h.checkpoint(entry(2));
    assert_eq!(h.current(), Some(&entry(2)));
    assert_eq!(h.undo_len(), 1);
}

#[test]
fn clear_empties_both_stacks() {
    let mut h = history_with(3);
    h.undo();
    h.clear();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}
