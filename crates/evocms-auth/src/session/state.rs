//! The session of the current request.
//!
//! A [`Session`] is loaded (or created) once per request by
//! [`super::SessionManager`], mutated in memory, and written back with
//! [`Session::dbsave`] at the end of the request. Writes are skipped when
//! nothing changed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use evocms_core::result::AppResult;
use evocms_core::types::{SessionId, UserId};
use evocms_database::store::SessionStore;
use evocms_entity::session::{DataEntry, SessionData, SessionUpdate};

use super::cookie::CookieDirective;
use super::messages::{MessageLevel, Messages};

/// Data key holding flash messages carried to the next request.
pub const MESSAGES_KEY: &str = "Messages";
/// Data key holding an unsaved comment preview.
pub const PREVIEW_COMMENT_KEY: &str = "core.preview_Comment";
/// Data key that disables the page cache for this session.
pub const NO_PAGE_CACHE_KEY: &str = "core.no_CachePageContent";

/// State of one visitor session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    key: Option<String>,
    user_id: Option<UserId>,
    is_validated: bool,
    data: SessionData,
    needs_save: bool,
    ip_address: String,
    messages: Messages,
}

impl Session {
    /// Session freshly inserted for this request.
    pub(crate) fn started(id: SessionId, key: String, ip_address: String) -> Self {
        Self {
            id,
            key: Some(key),
            user_id: None,
            is_validated: false,
            data: SessionData::new(),
            needs_save: false,
            ip_address,
            messages: Messages::default(),
        }
    }

    /// Session resumed from a stored row. Marked dirty so `lastseen`
    /// advances when the request ends.
    pub(crate) fn resumed(
        id: SessionId,
        key: String,
        user_id: Option<UserId>,
        data: SessionData,
        ip_address: String,
    ) -> Self {
        Self {
            id,
            key: Some(key),
            user_id,
            is_validated: true,
            data,
            needs_save: true,
            ip_address,
            messages: Messages::default(),
        }
    }

    /// Row id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Session key, `None` after logout.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether the session came from a valid cookie.
    pub fn is_validated(&self) -> bool {
        self.is_validated
    }

    /// Whether there are unsaved changes.
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Attached user.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Whether a user is attached.
    pub fn has_user(&self) -> bool {
        self.user_id.is_some()
    }

    /// Attach or detach a user. Only a real change marks the session dirty.
    pub fn set_user_id(&mut self, user_id: Option<UserId>) {
        if self.user_id != user_id {
            self.user_id = user_id;
            self.needs_save = true;
        }
    }

    /// Read a value. An entry whose expiry is at or before `now` is removed
    /// and reads as `None`.
    pub fn get(&mut self, name: &str, now: DateTime<Utc>) -> Option<&serde_json::Value> {
        let live = self.data.get(name)?.is_live(now.timestamp());
        if !live {
            debug!(target: "session", name, "Session data expired");
            self.data.remove(name);
            self.needs_save = true;
            return None;
        }
        self.data.get(name).map(|entry| &entry.value)
    }

    /// Read and deserialize a value; undecodable values read as `None`.
    pub fn get_typed<T: DeserializeOwned>(&mut self, name: &str, now: DateTime<Utc>) -> Option<T> {
        let value = self.get(name, now)?.clone();
        serde_json::from_value(value).ok()
    }

    /// Store a value. `expire_secs > 0` sets an expiry relative to `now`.
    ///
    /// Storing the same value again without an expiry, over an entry that
    /// has none, does not mark the session dirty.
    pub fn set(
        &mut self,
        name: &str,
        value: serde_json::Value,
        expire_secs: i64,
        now: DateTime<Utc>,
    ) {
        let unchanged = self.data.get(name).is_some_and(|entry| {
            entry.value == value && entry.expires_at.is_none() && expire_secs == 0
        });
        if unchanged {
            return;
        }

        let expires_at = (expire_secs > 0).then(|| now.timestamp() + expire_secs);
        debug!(target: "session", name, ?expires_at, "Session data set");
        self.data
            .insert(name.to_string(), DataEntry { expires_at, value });
        self.needs_save = true;

        if name == MESSAGES_KEY || name == PREVIEW_COMMENT_KEY {
            self.set(NO_PAGE_CACHE_KEY, serde_json::json!(1), 0, now);
        }
    }

    /// Serialize and store a value.
    pub fn set_typed<T: Serialize>(
        &mut self,
        name: &str,
        value: &T,
        expire_secs: i64,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let value = serde_json::to_value(value)?;
        self.set(name, value, expire_secs, now);
        Ok(())
    }

    /// Remove a value; marks the session dirty only if it existed.
    pub fn delete(&mut self, name: &str) {
        if self.data.remove(name).is_some() {
            debug!(target: "session", name, "Session data deleted");
            self.needs_save = true;
        }
    }

    /// Queue a flash message for display.
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.add(level, text);
    }

    /// Take the flash messages of this request, leaving none behind.
    pub fn take_messages(&mut self) -> Messages {
        std::mem::take(&mut self.messages)
    }

    /// Move messages stored by a previous request into this request.
    pub(crate) fn adopt_stored_messages(&mut self, now: DateTime<Utc>) {
        if let Some(stored) = self.get_typed::<Messages>(MESSAGES_KEY, now) {
            self.messages.extend(stored);
        }
        self.delete(MESSAGES_KEY);
    }

    /// Park messages nobody displayed so the next request shows them.
    pub fn stash_messages(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let pending = self.take_messages();
        self.set_typed(MESSAGES_KEY, &pending, 0, now)
    }

    /// Persist the session if it changed. Returns whether a write happened.
    pub async fn dbsave(&mut self, store: &dyn SessionStore, now: DateTime<Utc>) -> AppResult<bool> {
        if !self.needs_save {
            return Ok(false);
        }

        let data = if self.data.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&self.data)?)
        };

        store
            .update(&SessionUpdate {
                id: self.id,
                key: self.key.clone(),
                data,
                user_id: self.user_id,
                ip_address: self.ip_address.clone(),
                last_seen: now,
            })
            .await?;

        debug!(target: "session", session_id = %self.id, "Session saved");
        self.needs_save = false;
        Ok(true)
    }

    /// Log out: forget key and data, persist at once, then detach the user.
    /// The returned directive expires the client's cookie.
    pub async fn logout(
        &mut self,
        store: &dyn SessionStore,
        now: DateTime<Utc>,
    ) -> AppResult<CookieDirective> {
        self.key = None;
        self.data.clear();
        self.needs_save = true;
        self.dbsave(store, now).await?;
        self.user_id = None;
        debug!(target: "session", session_id = %self.id, "Session logged out");
        Ok(CookieDirective::Clear)
    }

    /// Re-read the data column. Undecodable data resets to an empty map.
    pub async fn reload_data(&mut self, store: &dyn SessionStore) -> AppResult<()> {
        let raw = store.load_data(self.id).await?;
        self.data = decode_data(self.id, raw.as_deref());
        Ok(())
    }
}

/// Decode a stored data column; `NULL`, empty and corrupt payloads all give
/// an empty map.
pub(crate) fn decode_data(id: SessionId, raw: Option<&str>) -> SessionData {
    match raw {
        None | Some("") => SessionData::new(),
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            error!(
                session_id = %id,
                error = %e,
                data = raw,
                "Session data corrupted"
            );
            SessionData::new()
        }),
    }
}
