//! Session token persistence

use std::rc::Rc;

use crate::error::ClientResult;
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// Saves, reads and clears the bearer token.
///
/// There is no client-side expiry; the server's answer to the session
/// probe is the only validity check.
pub struct SessionStore<S> {
    store: Rc<S>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self { store }
    }

    pub fn save_token(&self, token: &str) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, token)
    }

    /// The stored token; blank values count as absent
    pub fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn clear_token(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY)
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_save_get_clear() {
        let backing = Rc::new(MemoryStore::new());
        let session = SessionStore::new(Rc::clone(&backing));

        assert!(!session.has_token());
        session.save_token("jwt-123").unwrap();
        assert_eq!(session.token().as_deref(), Some("jwt-123"));
        assert_eq!(backing.get(TOKEN_KEY).as_deref(), Some("jwt-123"));

        session.clear_token().unwrap();
        assert_eq!(session.token(), None);
        assert!(backing.is_empty());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let backing = Rc::new(MemoryStore::with_entries([(TOKEN_KEY, "  ")]));
        let session = SessionStore::new(backing);
        assert_eq!(session.token(), None);
    }
}
