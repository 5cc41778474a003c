//! Browsing-session key-value store.
//!
//! Screens hand small pieces of state to each other through this store
//! (e.g. the discovery screen records which garment the user wants to
//! try on). Values live for the lifetime of the process only; there is
//! no expiry and nothing is persisted across restarts.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Key under which the selected garment image URL is stored.
pub const TRY_ON_IMAGE_URL_KEY: &str = "tryOnImageUrl";

/// Thread-safe string map scoped to one browsing session.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        tracing::debug!(key = %key, "Session value stored");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.into());
    }

    /// Read the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Remove and return the value stored under `key`.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// Drop every stored value (equivalent to a full app restart).
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Record the garment image URL chosen for try-on.
    pub fn set_try_on_image_url(&self, url: impl Into<String>) {
        self.set(TRY_ON_IMAGE_URL_KEY, url);
    }

    /// The garment image URL chosen for try-on, if one was recorded.
    ///
    /// Empty strings are treated as absent.
    pub fn try_on_image_url(&self) -> Option<String> {
        self.get(TRY_ON_IMAGE_URL_KEY).filter(|url| !url.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = SessionStore::new();
        assert_eq!(store.get(TRY_ON_IMAGE_URL_KEY), None);
        assert_eq!(store.try_on_image_url(), None);
    }

    #[test]
    fn try_on_url_uses_well_known_key() {
        let store = SessionStore::new();
        store.set_try_on_image_url("https://x/garment.png");

        assert_eq!(
            store.get("tryOnImageUrl").as_deref(),
            Some("https://x/garment.png")
        );
        assert_eq!(
            store.try_on_image_url().as_deref(),
            Some("https://x/garment.png")
        );
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = SessionStore::new();
        store.set_try_on_image_url("https://x/a.png");
        store.set_try_on_image_url("https://x/b.png");

        assert_eq!(store.try_on_image_url().as_deref(), Some("https://x/b.png"));
    }

    #[test]
    fn empty_url_reads_as_absent() {
        let store = SessionStore::new();
        store.set_try_on_image_url("");
        assert_eq!(store.try_on_image_url(), None);
    }

    #[test]
    fn remove_and_clear() {
        let store = SessionStore::new();
        store.set("a", "1");
        store.set("b", "2");

        assert_eq!(store.remove("a").as_deref(), Some("1"));
        assert_eq!(store.remove("a"), None);

        store.clear();
        assert_eq!(store.get("b"), None);
    }
}
