//! Linear undo/redo history
//!
//! A [`HistoryStack`] records commands whose effect has already been applied
//! and replays them backwards or forwards on request. Commands receive the
//! mutation target (`&mut T`) instead of the stack, so a command can never
//! push onto the history while it is being replayed.

use std::collections::VecDeque;

use serde::Serialize;

/// Group tag for object creation/removal
pub const GROUP_OBJECTS: &str = "object-management";
/// Group tag for gizmo transforms
pub const GROUP_TRANSFORM: &str = "transform";
/// Group tag for color/material edits
pub const GROUP_APPEARANCE: &str = "appearance";

/// Default number of retained steps
pub const DEFAULT_LIMIT: usize = 100;

/// A reversible unit of change on `T`.
///
/// `undo` must restore exactly the state that existed before `execute`
/// first ran.
pub trait Command<T> {
    /// Apply (or re-apply) the change
    fn execute(&mut self, target: &mut T);

    /// Revert the change
    fn undo(&mut self, target: &mut T);

    /// Human-readable description shown in history listings
    fn label(&self) -> &str;

    /// Optional category tag; metadata only
    fn group(&self) -> Option<&str> {
        None
    }
}

type Apply<T> = Box<dyn FnMut(&mut T)>;

/// Command built from a pair of closures
pub struct FnCommand<T> {
    label: String,
    group: Option<String>,
    execute: Apply<T>,
    undo: Apply<T>,
}

impl<T> FnCommand<T> {
    pub fn new(
        label: impl Into<String>,
        execute: impl FnMut(&mut T) + 'static,
        undo: impl FnMut(&mut T) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            group: None,
            execute: Box::new(execute),
            undo: Box::new(undo),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl<T> Command<T> for FnCommand<T> {
    fn execute(&mut self, target: &mut T) {
        (self.execute)(target)
    }

    fn undo(&mut self, target: &mut T) {
        (self.undo)(target)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// Cursor position reported to change listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStatus {
    pub index: usize,
    pub length: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// One row of a history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub position: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// `true` for entries below the cursor (undoable)
    pub applied: bool,
}

/// Ordered command sequence with a cursor.
///
/// Entries before `index` are applied and undoable, entries from `index`
/// onward have been undone and are redoable.
pub struct HistoryStack<T> {
    commands: VecDeque<Box<dyn Command<T>>>,
    index: usize,
    /// Maximum retained entries, 0 = unlimited
    limit: usize,
    on_change: Option<Box<dyn FnMut(HistoryStatus)>>,
}

impl<T> HistoryStack<T> {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            commands: VecDeque::new(),
            index: 0,
            limit,
            on_change: None,
        }
    }

    /// Record an already-applied command.
    ///
    /// Discards everything that was undone, then evicts the oldest entries
    /// while the stack is over its limit.
    pub fn push(&mut self, command: Box<dyn Command<T>>) {
        if self.index < self.commands.len() {
            tracing::debug!(
                "history: discarding {} redo entries",
                self.commands.len() - self.index
            );
            self.commands.truncate(self.index);
        }

        tracing::debug!("history: push '{}'", command.label());
        self.commands.push_back(command);
        self.index += 1;

        while self.limit > 0 && self.commands.len() > self.limit {
            self.commands.pop_front();
            self.index -= 1;
        }

        self.notify();
    }

    /// Revert the most recent applied command. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, target: &mut T) -> bool {
        if self.index == 0 {
            tracing::debug!("history: nothing to undo");
            return false;
        }

        self.index -= 1;
        let command = &mut self.commands[self.index];
        tracing::debug!("history: undo '{}'", command.label());
        command.undo(target);
        self.notify();
        true
    }

    /// Re-apply the next undone command. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, target: &mut T) -> bool {
        if self.index == self.commands.len() {
            tracing::debug!("history: nothing to redo");
            return false;
        }

        let command = &mut self.commands[self.index];
        tracing::debug!("history: redo '{}'", command.label());
        command.execute(target);
        self.index += 1;
        self.notify();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        let had_entries = !self.commands.is_empty();
        self.commands.clear();
        self.index = 0;
        if had_entries {
            self.notify();
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the retained depth (0 = unlimited). Takes effect on the next
    /// push.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            index: self.index,
            length: self.commands.len(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Register a listener called after every change to the stack
    pub fn set_on_change(&mut self, callback: impl FnMut(HistoryStatus) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// List entries oldest first, optionally only those tagged with `group`
    pub fn entries(&self, group: Option<&str>) -> Vec<HistoryEntry> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, c)| group.is_none() || c.group() == group)
            .map(|(position, c)| HistoryEntry {
                position,
                label: c.label().to_string(),
                group: c.group().map(str::to_string),
                applied: position < self.index,
            })
            .collect()
    }

    fn notify(&mut self) {
        let status = self.status();
        if let Some(callback) = self.on_change.as_mut() {
            callback(status);
        }
    }
}

impl<T> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Appends `value` on execute, pops it on undo
    fn append(value: i32) -> Box<dyn Command<Vec<i32>>> {
        Box::new(FnCommand::new(
            format!("append {value}"),
            move |v: &mut Vec<i32>| v.push(value),
            |v: &mut Vec<i32>| {
                v.pop();
            },
        ))
    }

    /// Apply then record, the way editor code uses the stack
    fn apply(history: &mut HistoryStack<Vec<i32>>, target: &mut Vec<i32>, value: i32) {
        target.push(value);
        history.push(append(value));
    }

    #[test]
    fn test_empty_history() {
        let mut h: HistoryStack<Vec<i32>> = HistoryStack::new();
        let mut target = vec![];
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(!h.undo(&mut target));
        assert!(!h.redo(&mut target));
        assert!(target.is_empty());
        assert_eq!(h.index(), 0);
    }

    #[test]
    fn test_push_does_not_execute() {
        let mut h = HistoryStack::new();
        let target: Vec<i32> = vec![];
        h.push(append(1));
        assert!(target.is_empty());
        assert_eq!(h.len(), 1);
        assert!(h.can_undo());
    }

    #[test]
    fn test_undo_redo_order() {
        let mut h = HistoryStack::new();
        let mut target = vec![];
        apply(&mut h, &mut target, 1);
        apply(&mut h, &mut target, 2);
        apply(&mut h, &mut target, 3);

        assert!(h.undo(&mut target));
        assert_eq!(target, vec![1, 2]);
        assert!(h.undo(&mut target));
        assert_eq!(target, vec![1]);

        assert!(h.redo(&mut target));
        assert_eq!(target, vec![1, 2]);
        assert!(h.redo(&mut target));
        assert_eq!(target, vec![1, 2, 3]);
        assert!(!h.redo(&mut target));
    }

    #[test]
    fn test_push_truncates_redo() {
        let mut h = HistoryStack::new();
        let mut target = vec![];
        apply(&mut h, &mut target, 1);
        apply(&mut h, &mut target, 2);
        apply(&mut h, &mut target, 3);
        assert_eq!(h.index(), 3);

        h.undo(&mut target);
        h.undo(&mut target);
        assert_eq!(h.index(), 1);

        apply(&mut h, &mut target, 4);
        assert_eq!(h.len(), 2);
        assert_eq!(h.index(), 2);
        assert!(!h.can_redo());
        assert_eq!(target, vec![1, 4]);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut h = HistoryStack::with_limit(3);
        let mut target = vec![];
        for i in 0..4 {
            apply(&mut h, &mut target, i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.index(), 3);
        assert!(h.can_undo());

        let mut undone = 0;
        while h.undo(&mut target) {
            undone += 1;
        }
        assert_eq!(undone, 3);
        // The evicted first push stays applied
        assert_eq!(target, vec![0]);
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let mut h = HistoryStack::with_limit(0);
        let mut target = vec![];
        for i in 0..250 {
            apply(&mut h, &mut target, i);
        }
        assert_eq!(h.len(), 250);
    }

    #[test]
    fn test_set_limit_applies_on_next_push() {
        let mut h = HistoryStack::with_limit(0);
        let mut target = vec![];
        for i in 0..5 {
            apply(&mut h, &mut target, i);
        }
        h.set_limit(2);
        assert_eq!(h.len(), 5);
        apply(&mut h, &mut target, 5);
        assert_eq!(h.len(), 2);
        assert_eq!(h.index(), 2);
    }

    #[test]
    fn test_clear() {
        let mut h = HistoryStack::new();
        let mut target = vec![];
        apply(&mut h, &mut target, 1);
        apply(&mut h, &mut target, 2);
        h.undo(&mut target);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.index(), 0);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_entries_filter_by_group() {
        let mut h: HistoryStack<Vec<i32>> = HistoryStack::new();
        let mut target = vec![];
        h.push(Box::new(
            FnCommand::new("a", |_: &mut Vec<i32>| {}, |_: &mut Vec<i32>| {})
                .with_group(GROUP_OBJECTS),
        ));
        h.push(Box::new(
            FnCommand::new("b", |_: &mut Vec<i32>| {}, |_: &mut Vec<i32>| {})
                .with_group(GROUP_TRANSFORM),
        ));
        h.push(append(1));
        h.undo(&mut target);

        let all = h.entries(None);
        assert_eq!(all.len(), 3);
        assert!(all[0].applied);
        assert!(!all[2].applied);

        let transforms = h.entries(Some(GROUP_TRANSFORM));
        assert_eq!(transforms.len(), 1);
        assert_eq!(transforms[0].label, "b");
        assert_eq!(transforms[0].position, 1);
    }

    #[test]
    fn test_on_change_reports_status() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = HistoryStack::new();
        let sink = seen.clone();
        h.set_on_change(move |status| sink.borrow_mut().push(status));

        let mut target = vec![];
        apply(&mut h, &mut target, 1);
        h.undo(&mut target);
        h.undo(&mut target); // no-op, no notification
        h.redo(&mut target);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].can_undo);
        assert!(seen[1].can_redo);
        assert_eq!(seen[2].index, 1);
    }
}
