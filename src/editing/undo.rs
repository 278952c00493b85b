// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Bounded undo/redo history of whole-document snapshots.
//!
//! Callers push a snapshot *before* they mutate. Undo swaps the current
//! state with the most recent snapshot and parks the current state on the
//! redo stack; redo is the mirror image. Pushing a new snapshot starts a
//! new branch of history and drops any redo path.

use crate::settings;
use std::collections::VecDeque;

/// Undo and redo stacks for snapshots of type `T`
#[derive(Debug, Clone)]
pub struct UndoState<T> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

impl<T> UndoState<T> {
    /// History bounded by the default undo limit
    pub fn new() -> Self {
        Self::with_limit(settings::undo::LIMIT)
    }

    /// History bounded to `limit` snapshots (at least one)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state that precedes a mutation.
    ///
    /// Discards the oldest snapshot past the limit and clears redo.
    pub fn add_undo_group(&mut self, snapshot: T) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Step back. Returns the state to make current, or `None` when there
    /// is nothing to undo (in which case `current` is dropped unchanged).
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T> Default for UndoState<T> {
    fn default() -> Self {
        Self::new()
    }
}
