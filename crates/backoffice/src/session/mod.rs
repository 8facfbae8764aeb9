//! Operator session: the bearer token used for every admin call.
//!
//! A [`Session`] is created explicitly and handed to the
//! [`ApiClient`](crate::ApiClient); nothing reads the token from global
//! state.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore, TOKEN_KEY};

use tracing::debug;

use crate::error::Result;

/// Bearer-token session backed by a [`SessionStore`].
pub struct Session {
    store: Box<dyn SessionStore>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemorySessionStore::new())
    }

    /// Session persisted to a JSON file.
    pub fn from_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(FileSessionStore::new(path))
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Result<Option<String>> {
        self.store.load()
    }

    /// True when a token is stored. Unreadable storage counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.load(), Ok(Some(_)))
    }

    /// Remember a freshly issued token.
    pub fn establish(&self, token: &str) -> Result<()> {
        debug!("storing admin session token");
        self.store.save(token)
    }

    /// Forget the token (logout, or the server rejected it).
    pub fn invalidate(&self) -> Result<()> {
        debug!("discarding admin session token");
        self.store.clear()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
