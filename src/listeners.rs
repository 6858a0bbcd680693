//! Change listeners
//!
//! Parts of the client that mutate visible state call [`Listeners::emit`];
//! the display layer subscribes once and re-reads the snapshot.

use std::cell::RefCell;
use std::rc::Rc;

type Listener = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct Listeners {
    inner: Rc<RefCell<Vec<Listener>>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().push(Rc::new(listener));
    }

    /// Call every listener. Listeners may subscribe more listeners; those
    /// run from the next emit on.
    pub fn emit(&self) {
        let listeners: Vec<Listener> = self.inner.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("count", &self.len()).finish()
    }
}
