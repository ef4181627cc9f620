//! Client-side session storage
//!
//! The session record lives under the `"user"` key and the store token under
//! `"jwt"`, both as strings, the way a browser's local storage holds them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::CoreResult;
use crate::models::{Session, SessionInfo};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "jwt";

/// Key/value storage for session data
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

/// Process-wide storage kept in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

/// Session handle passed to every container
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Current session, if one was saved and is readable
    pub fn load(&self) -> Option<Session> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("Ignoring unreadable session record: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> CoreResult<()> {
        let raw = serde_json::to_string(session)?;
        self.storage.set_item(USER_KEY, &raw);
        log::debug!("Session saved for {}", session.email);
        Ok(())
    }

    /// Keep the token of a successful login, if the store returned one
    pub fn save_token(&self, info: &SessionInfo) {
        if let Some(jwt) = &info.jwt {
            self.storage.set_item(TOKEN_KEY, jwt);
        }
    }

    /// Email of the logged-in user
    pub fn email(&self) -> Option<String> {
        self.load().map(|s| s.email)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
