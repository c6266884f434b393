//! Hit log and automatic pruning of old hits and sessions.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use evocms_core::config::{PruneMode, StatsConfig};
use evocms_core::error::AppError;
use evocms_core::result::AppResult;
use evocms_core::types::HitId;
use evocms_database::store::{HitStore, SessionStore, SettingsStore};
use evocms_entity::hit::NewHit;

use crate::context::RequestContext;

/// Settings key holding the date of the last prune.
pub const PRUNE_DONE_KEY: &str = "auto_prune_stats_done";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of a prune attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PruneOutcome {
    /// Old rows were deleted.
    Pruned {
        /// Hits removed.
        hits: u64,
        /// Sessions removed.
        sessions: u64,
    },
    /// A prune already ran today.
    AlreadyDone,
}

/// Records hits and prunes old statistics.
#[derive(Clone)]
pub struct Hitlist {
    hits: Arc<dyn HitStore>,
    sessions: Arc<dyn SessionStore>,
    settings: Arc<dyn SettingsStore>,
    config: StatsConfig,
}

impl std::fmt::Debug for Hitlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hitlist")
            .field("config", &self.config)
            .finish()
    }
}

impl Hitlist {
    /// Creates a new hit list.
    pub fn new(
        hits: Arc<dyn HitStore>,
        sessions: Arc<dyn SessionStore>,
        settings: Arc<dyn SettingsStore>,
        config: StatsConfig,
    ) -> Self {
        Self {
            hits,
            sessions,
            settings,
            config,
        }
    }

    /// Statistics configuration.
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Record the request described by `ctx`. Returns `None` when hit
    /// logging is disabled.
    pub async fn log_hit(
        &self,
        ctx: &RequestContext,
        uri: &str,
        referer: Option<&str>,
    ) -> AppResult<Option<HitId>> {
        if !self.config.log_hits {
            return Ok(None);
        }
        let hit = NewHit {
            session_id: ctx.session_id,
            uri: uri.to_string(),
            referer: referer.map(str::to_string),
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
            created_at: ctx.request_time,
        };
        let id = self.hits.insert(&hit).await?;
        debug!(hit = %id, session = %ctx.session_id, uri, "Hit logged");
        Ok(Some(id))
    }

    /// Run the page-mode prune after a hit was logged.
    pub async fn after_hit(&self, now: DateTime<Utc>) -> AppResult<Option<PruneOutcome>> {
        if self.config.auto_prune_mode != PruneMode::Page {
            return Ok(None);
        }
        self.dbprune(now).await.map(Some)
    }

    /// Delete hits and sessions older than `auto_prune_days`, at most once
    /// per calendar day.
    pub async fn dbprune(&self, now: DateTime<Utc>) -> AppResult<PruneOutcome> {
        let today = now.date_naive();
        let last_done = self
            .settings
            .get(PRUNE_DONE_KEY)
            .await?
            .and_then(|raw| NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok());
        if last_done.is_some_and(|day| day >= today) {
            debug!(%today, "Statistics already pruned today");
            return Ok(PruneOutcome::AlreadyDone);
        }

        let days = self.config.auto_prune_days;
        let cutoff = Duration::try_days(days)
            .and_then(|age| now.checked_sub_signed(age))
            .ok_or_else(|| {
                AppError::configuration(format!("stats.auto_prune_days is out of range: {days}"))
            })?;

        // Mark first so concurrent requests skip.
        self.settings
            .set(PRUNE_DONE_KEY, &today.format(DATE_FORMAT).to_string())
            .await?;

        let hits = self.hits.delete_before(cutoff).await?;
        let sessions = self.sessions.delete_seen_before(cutoff).await?;

        info!(hits, sessions, %cutoff, "Pruned old hits and sessions");
        Ok(PruneOutcome::Pruned { hits, sessions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use evocms_core::types::SessionId;
    use evocms_database::MemoryBackend;
    use evocms_entity::hit::Hit;
    use evocms_entity::session::SessionRow;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn hitlist(backend: &Arc<MemoryBackend>, mode: PruneMode) -> Hitlist {
        Hitlist::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            StatsConfig {
                log_hits: true,
                auto_prune_mode: mode,
                auto_prune_days: 15,
            },
        )
    }

    fn ctx(now: DateTime<Utc>) -> RequestContext {
        RequestContext {
            session_id: SessionId(1),
            user_id: None,
            ip_address: "10.0.0.1".into(),
            user_agent: Some("test".into()),
            request_time: now,
        }
    }

    fn seed(backend: &MemoryBackend, id: i64, when: DateTime<Utc>) {
        backend.put_hit(Hit {
            id: HitId(id),
            session_id: SessionId(id),
            uri: "/".into(),
            referer: None,
            ip_address: "10.0.0.1".into(),
            user_agent: None,
            created_at: when,
        });
        backend.put_session(SessionRow {
            id: SessionId(id),
            key: Some("k".into()),
            user_id: None,
            data: None,
            ip_address: "10.0.0.1".into(),
            last_seen: when,
        });
    }

    #[tokio::test]
    async fn test_log_hit_records_row() {
        let backend = Arc::new(MemoryBackend::new());
        let list = hitlist(&backend, PruneMode::Off);
        let id = list.log_hit(&ctx(at(1, 0)), "/api/v1/collections", None).await.unwrap();
        assert!(id.is_some());
        assert_eq!(backend.hit_count(), 1);
    }

    #[tokio::test]
    async fn test_log_hit_disabled() {
        let backend = Arc::new(MemoryBackend::new());
        let mut list = hitlist(&backend, PruneMode::Off);
        list.config.log_hits = false;
        assert!(list.log_hit(&ctx(at(1, 0)), "/", None).await.unwrap().is_none());
        assert_eq!(backend.hit_count(), 0);
    }

    #[tokio::test]
    async fn test_prune_once_per_day() {
        let backend = Arc::new(MemoryBackend::new());
        seed(&backend, 1, at(1, 0));
        seed(&backend, 2, at(25, 0));
        let list = hitlist(&backend, PruneMode::Cron);

        let outcome = list.dbprune(at(28, 8)).await.unwrap();
        assert_eq!(outcome, PruneOutcome::Pruned { hits: 1, sessions: 1 });
        assert_eq!(backend.hit_count(), 1);
        assert_eq!(backend.session_count(), 1);

        assert_eq!(list.dbprune(at(28, 20)).await.unwrap(), PruneOutcome::AlreadyDone);
        assert!(matches!(
            list.dbprune(at(29, 1)).await.unwrap(),
            PruneOutcome::Pruned { .. }
        ));
    }

    #[tokio::test]
    async fn test_after_hit_only_in_page_mode() {
        let backend = Arc::new(MemoryBackend::new());
        assert!(hitlist(&backend, PruneMode::Cron).after_hit(at(2, 0)).await.unwrap().is_none());
        assert!(hitlist(&backend, PruneMode::Off).after_hit(at(2, 0)).await.unwrap().is_none());
        assert_eq!(
            hitlist(&backend, PruneMode::Page).after_hit(at(2, 0)).await.unwrap(),
            Some(PruneOutcome::Pruned { hits: 0, sessions: 0 })
        );
    }

    #[tokio::test]
    async fn test_out_of_range_prune_age_is_a_config_error() {
        let backend = Arc::new(MemoryBackend::new());
        seed(&backend, 1, at(1, 0));
        let mut list = hitlist(&backend, PruneMode::Page);
        list.config.auto_prune_days = i64::MAX;

        let err = list.dbprune(at(25, 0)).await.unwrap_err();
        assert_eq!(err.kind, evocms_core::error::ErrorKind::Configuration);
        assert_eq!(backend.hit_count(), 1);
        assert_eq!(backend.session_count(), 1);
        assert!(
            SettingsStore::get(&*backend, PRUNE_DONE_KEY).await.unwrap().is_none(),
            "a failed prune must not mark the day as done"
        );
    }
}
