//! Request sequencing
//!
//! Overlapping requests of the same kind finish in network order. Each
//! request takes a [`Ticket`]; only the newest ticket of its kind, issued
//! in the current session epoch, may write its response into app state.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Bootstrap probe, login and registration
    Session,
    Dashboard,
    Leaderboard,
}

impl Action {
    fn index(self) -> usize {
        match self {
            Action::Session => 0,
            Action::Dashboard => 1,
            Action::Leaderboard => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub action: Action,
    pub generation: u64,
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    generations: [Cell<u64>; 3],
    epoch: Cell<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding earlier ones of the same kind
    pub fn issue(&self, action: Action) -> Ticket {
        let slot = &self.generations[action.index()];
        let generation = slot.get() + 1;
        slot.set(generation);
        Ticket {
            action,
            generation,
            epoch: self.epoch.get(),
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.epoch == self.epoch.get()
            && ticket.generation == self.generations[ticket.action.index()].get()
    }

    /// Session ended: every outstanding ticket becomes stale
    pub fn invalidate_session(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }
}
