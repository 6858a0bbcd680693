//! Global busy indicator
//!
//! Reference-counted: each action holds a [`BusyGuard`] and the indicator
//! stays on until the last guard is dropped.

use std::cell::Cell;
use std::rc::Rc;

use crate::listeners::Listeners;

#[derive(Clone, Debug, Default)]
pub struct BusyIndicator {
    depth: Rc<Cell<usize>>,
    listeners: Listeners,
}

impl BusyIndicator {
    pub fn new(listeners: Listeners) -> Self {
        Self {
            depth: Rc::new(Cell::new(0)),
            listeners,
        }
    }

    pub fn begin(&self) -> BusyGuard {
        let depth = self.depth.get() + 1;
        self.depth.set(depth);
        if depth == 1 {
            self.listeners.emit();
        }
        BusyGuard {
            depth: Rc::clone(&self.depth),
            listeners: self.listeners.clone(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.depth.get() > 0
    }

    /// Number of actions in flight
    pub fn depth(&self) -> usize {
        self.depth.get()
    }
}

/// Keeps the indicator on while alive
#[must_use = "the indicator turns off as soon as the guard is dropped"]
pub struct BusyGuard {
    depth: Rc<Cell<usize>>,
    listeners: Listeners,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let depth = self.depth.get().saturating_sub(1);
        self.depth.set(depth);
        if depth == 0 {
            self.listeners.emit();
        }
    }
}
