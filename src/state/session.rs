//! Session persistence for the bearer token and the cached user profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth context is the only writer. Values survive a page reload through
//! browser `localStorage`; native builds and tests use [`MemoryBackend`].
//! This layer never validates what it stores.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::net::types::UserProfile;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// String key-value storage backing a [`SessionStore`].
pub trait SessionBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`, best effort. Outside the browser every call is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("session: localStorage write failed for {key}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// In-process storage. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// What [`SessionStore::load`] found.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredSession {
    pub token: String,
    /// `None` when the cached profile is missing or no longer decodes.
    pub profile: Option<UserProfile>,
}

/// Token + profile cache over a [`SessionBackend`].
#[derive(Clone, Debug, Default)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn save(&self, token: &str, profile: &UserProfile) {
        self.backend.set(TOKEN_KEY, token);
        match serde_json::to_string(profile) {
            Ok(raw) => self.backend.set(USER_KEY, &raw),
            Err(e) => {
                log::warn!("session: profile not cached: {e}");
                self.backend.remove(USER_KEY);
            }
        }
    }

    pub fn load(&self) -> Option<StoredSession> {
        let token = self.backend.get(TOKEN_KEY)?;
        let profile = self
            .backend
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        Some(StoredSession { token, profile })
    }

    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY)
    }

    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}
