//! Per-request session resolution.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use evocms_core::config::SessionConfig;
use evocms_core::result::AppResult;
use evocms_database::store::SessionStore;
use evocms_entity::session::NewSession;

use super::cookie::{CookieDirective, SessionCookie};
use super::key::generate_key;
use super::state::{Session, decode_data};

/// Resolves the session of each request and writes it back afterwards.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Underlying store.
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Resume the session named by `cookie`, or start a new one.
    ///
    /// A session is resumed only when id and key match a row seen within
    /// the configured timeout. Starting a session inserts its row at once
    /// and asks the response to set a new cookie.
    pub async fn resume_or_start(
        &self,
        cookie: Option<&str>,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(Session, CookieDirective)> {
        let Some(raw) = cookie else {
            debug!(target: "session", "No session cookie");
            return self.start(ip_address, now).await;
        };

        let Some(parsed) = SessionCookie::parse(raw) else {
            debug!(target: "session", "Invalid session cookie format");
            return self.start(ip_address, now).await;
        };

        let since = now - Duration::seconds(self.config.timeout_seconds);
        let Some(row) = self.store.find_active(parsed.id, &parsed.key, since).await? else {
            debug!(
                target: "session",
                session_id = %parsed.id,
                "Session not found or timed out"
            );
            return self.start(ip_address, now).await;
        };

        debug!(target: "session", session_id = %row.id, "Session resumed");
        let data = decode_data(row.id, row.data.as_deref());
        let mut session = Session::resumed(
            row.id,
            parsed.key,
            row.user_id,
            data,
            ip_address.to_string(),
        );
        session.adopt_stored_messages(now);
        Ok((session, CookieDirective::Keep))
    }

    async fn start(
        &self,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(Session, CookieDirective)> {
        let key = generate_key(self.config.key_length);
        let id = self
            .store
            .insert(&NewSession {
                key: key.clone(),
                ip_address: ip_address.to_string(),
                last_seen: now,
            })
            .await?;

        info!(target: "session", session_id = %id, "Session started");
        let cookie = SessionCookie {
            id,
            key: key.clone(),
        };
        Ok((
            Session::started(id, key, ip_address.to_string()),
            CookieDirective::Set(cookie),
        ))
    }

    /// End-of-request write-back: keep undisplayed messages, then save if
    /// anything changed.
    pub async fn finish(&self, session: &mut Session, now: DateTime<Utc>) -> AppResult<bool> {
        session.stash_messages(now)?;
        session.dbsave(self.store.as_ref(), now).await
    }

    /// Log the session out and return the cookie directive to send.
    pub async fn logout(&self, session: &mut Session, now: DateTime<Utc>) -> AppResult<CookieDirective> {
        session.logout(self.store.as_ref(), now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use evocms_database::MemoryBackend;
    use serde_json::json;

    use crate::session::messages::MessageLevel;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn manager() -> (Arc<MemoryBackend>, SessionManager) {
        let backend = Arc::new(MemoryBackend::new());
        let manager = SessionManager::new(backend.clone(), SessionConfig::default());
        (backend, manager)
    }

    fn cookie_of(directive: &CookieDirective) -> String {
        match directive {
            CookieDirective::Set(cookie) => cookie.to_string(),
            other => panic!("expected Set, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_cookie_starts_session() {
        let (backend, manager) = manager();
        let (session, directive) = manager.resume_or_start(None, "1.2.3.4", now()).await.unwrap();

        assert!(!session.is_validated());
        assert_eq!(session.key().map(str::len), Some(32));
        assert_eq!(backend.session_count(), 1);
        assert_eq!(cookie_of(&directive), format!("{}_{}", session.id(), session.key().unwrap()));
    }

    #[tokio::test]
    async fn test_malformed_cookie_starts_session() {
        let (backend, manager) = manager();
        let (_, directive) = manager
            .resume_or_start(Some("garbage"), "1.2.3.4", now())
            .await
            .unwrap();
        assert!(matches!(directive, CookieDirective::Set(_)));
        assert_eq!(backend.session_count(), 1);
    }

    #[tokio::test]
    async fn test_valid_cookie_resumes_session() {
        let (_, manager) = manager();
        let (mut first, directive) = manager.resume_or_start(None, "ip", now()).await.unwrap();
        first.set("color", json!("blue"), 0, now());
        manager.finish(&mut first, now()).await.unwrap();

        let cookie = cookie_of(&directive);
        let later = now() + Duration::hours(1);
        let (mut second, directive) = manager
            .resume_or_start(Some(&cookie), "ip", later)
            .await
            .unwrap();

        assert_eq!(directive, CookieDirective::Keep);
        assert_eq!(second.id(), first.id());
        assert!(second.is_validated());
        assert!(second.needs_save());
        assert_eq!(second.get("color", later), Some(&json!("blue")));
    }

    #[tokio::test]
    async fn test_wrong_key_or_stale_session_starts_new() {
        let (backend, manager) = manager();
        let (first, directive) = manager.resume_or_start(None, "ip", now()).await.unwrap();
        let cookie = cookie_of(&directive);

        let forged = format!("{}_wrongkey", first.id());
        let (other, _) = manager
            .resume_or_start(Some(&forged), "ip", now())
            .await
            .unwrap();
        assert_ne!(other.id(), first.id());

        let timeout = manager.config().timeout_seconds;
        let expired = now() + Duration::seconds(timeout);
        let (stale, _) = manager
            .resume_or_start(Some(&cookie), "ip", expired)
            .await
            .unwrap();
        assert_ne!(stale.id(), first.id());
        assert_eq!(backend.session_count(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_data_resumes_with_empty_map() {
        let (backend, manager) = manager();
        let (first, directive) = manager.resume_or_start(None, "ip", now()).await.unwrap();
        let mut row = backend.session(first.id()).unwrap();
        row.data = Some("][".into());
        backend.put_session(row);

        let (mut resumed, _) = manager
            .resume_or_start(Some(&cookie_of(&directive)), "ip", now())
            .await
            .unwrap();
        assert!(resumed.is_validated());
        assert_eq!(resumed.get("anything", now()), None);
    }

    #[tokio::test]
    async fn test_flash_messages_survive_one_request() {
        let (_, manager) = manager();
        let (mut first, directive) = manager.resume_or_start(None, "ip", now()).await.unwrap();
        first.add_message(MessageLevel::Note, "Hello");
        manager.finish(&mut first, now()).await.unwrap();

        let cookie = cookie_of(&directive);
        let (mut second, _) = manager
            .resume_or_start(Some(&cookie), "ip", now())
            .await
            .unwrap();
        assert_eq!(second.take_messages().len(), 1);
        manager.finish(&mut second, now()).await.unwrap();

        let (mut third, _) = manager
            .resume_or_start(Some(&cookie), "ip", now())
            .await
            .unwrap();
        assert!(third.take_messages().is_empty());
    }

    #[tokio::test]
    async fn test_logged_out_session_cannot_resume() {
        let (_, manager) = manager();
        let (mut first, directive) = manager.resume_or_start(None, "ip", now()).await.unwrap();
        let cookie = cookie_of(&directive);
        assert_eq!(
            manager.logout(&mut first, now()).await.unwrap(),
            CookieDirective::Clear
        );

        let (again, directive) = manager
            .resume_or_start(Some(&cookie), "ip", now())
            .await
            .unwrap();
        assert_ne!(again.id(), first.id());
        assert!(matches!(directive, CookieDirective::Set(_)));
    }
}
