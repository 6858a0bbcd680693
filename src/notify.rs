//! Toast notifications
//!
//! A notification stays in the active list for a fixed display time and is
//! then removed, whatever the user does. Several may be visible at once;
//! they stack in insertion order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::listeners::Listeners;

/// Runs a task once after a delay
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

impl<T: Scheduler + ?Sized> Scheduler for Rc<T> {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        (**self).schedule(delay, task)
    }
}

struct ScheduledTask {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock past a
/// task's due time. Tasks due at the same instant run in scheduling order.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    tasks: RefCell<Vec<ScheduledTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Move the clock forward and run every task that became due.
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                let index = tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| tasks.remove(i))
            };

            match next {
                Some(task) => {
                    self.now.set(task.due);
                    (task.task)();
                    ran += 1;
                }
                None => break,
            }
        }

        self.now.set(target);
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.tasks.borrow_mut().push(ScheduledTask {
            due: self.now.get() + delay,
            seq,
            task,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn css_class(&self) -> String {
        format!("toast {}", self.kind.as_str())
    }
}

/// Active notifications plus the timer that expires them
#[derive(Clone)]
pub struct Notifier {
    active: Rc<RefCell<Vec<Notification>>>,
    next_id: Rc<Cell<u64>>,
    display_time: Duration,
    scheduler: Rc<dyn Scheduler>,
    listeners: Listeners,
}

impl Notifier {
    pub fn new(scheduler: Rc<dyn Scheduler>, display_time: Duration, listeners: Listeners) -> Self {
        Self {
            active: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(1)),
            display_time,
            scheduler,
            listeners,
        }
    }

    pub fn display_time(&self) -> Duration {
        self.display_time
    }

    /// Show `message` and schedule its removal. Returns the notification id.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let message = message.into();
        tracing::debug!(id, kind = kind.as_str(), %message, "Notification shown");
        self.active
            .borrow_mut()
            .push(Notification { id, message, kind });
        self.listeners.emit();

        let active = Rc::downgrade(&self.active);
        let listeners = self.listeners.clone();
        self.scheduler.schedule(
            self.display_time,
            Box::new(move || {
                if let Some(active) = active.upgrade() {
                    active.borrow_mut().retain(|n| n.id != id);
                    listeners.emit();
                }
            }),
        );

        id
    }

    /// Shorthand for the default kind
    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::default())
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Error)
    }

    /// Currently visible notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.active.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.active.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.borrow().is_empty()
    }
}
