//! Shared access token storage

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Holds the current access token, if any
///
/// Clones share the same slot, so a token stored through one handle is seen
/// by all of them.
#[derive(Clone, Default)]
pub struct TokenHolder {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored token
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write() = Some(token.into());
    }

    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }
}

impl fmt::Debug for TokenHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenHolder")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
