//! Session tracking middleware.
//!
//! Resumes or starts the visitor's session before the handler runs, logs
//! the hit, and saves the session afterwards. A fresh session gets its
//! cookie on the response; a logged out one gets it expired.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{REFERER, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Cookie, HeaderMapExt, UserAgent};
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, warn};

use evocms_auth::{CookieDirective, Session, SessionManager};
use evocms_core::result::AppResult;
use evocms_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The request's session, shared between middleware and handler, plus the
/// cookie directive the response will carry.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<Session>>,
    directive: Arc<Mutex<CookieDirective>>,
}

impl SessionHandle {
    /// Wrap a session and the directive it was resumed or started with.
    pub fn new(session: Session, directive: CookieDirective) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            directive: Arc::new(Mutex::new(directive)),
        }
    }

    /// Lock the session for reading or writing.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    /// Log the session out; the response will expire the cookie.
    pub async fn logout(&self, manager: &SessionManager, now: DateTime<Utc>) -> AppResult<()> {
        let mut session = self.session.lock().await;
        let directive = manager.logout(&mut session, now).await?;
        *self.directive.lock().await = directive;
        Ok(())
    }

    /// Cookie directive pending for the response.
    pub async fn directive(&self) -> CookieDirective {
        self.directive.lock().await.clone()
    }
}

/// Client address: first `X-Forwarded-For` entry, else the peer address.
fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Track the session of every request passing through.
pub async fn track_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let now = Utc::now();
    let config = &state.config.session;

    let headers = request.headers();
    let cookie = headers
        .typed_get::<Cookie>()
        .and_then(|c| c.get(&config.cookie_name).map(str::to_string));
    let ip_address = client_ip(headers, request.extensions().get());
    let user_agent = headers
        .typed_get::<UserAgent>()
        .map(|ua| ua.as_str().to_string());
    let referer = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let uri = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), |pq| pq.to_string());

    let (session, directive) = match state
        .session_manager
        .resume_or_start(cookie.as_deref(), &ip_address, now)
        .await
    {
        Ok(started) => started,
        Err(e) => return ApiError(e).into_response(),
    };

    let ctx = RequestContext {
        session_id: session.id(),
        user_id: session.user_id(),
        ip_address,
        user_agent,
        request_time: now,
    };

    if let Err(e) = state.hitlist.log_hit(&ctx, &uri, referer.as_deref()).await {
        warn!(error = %e, session_id = %ctx.session_id, "Failed to log hit");
    }
    match state.hitlist.after_hit(now).await {
        Ok(Some(outcome)) => debug!(?outcome, "Inline statistics prune"),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Inline statistics prune failed"),
    }

    let handle = SessionHandle::new(session, directive);
    request.extensions_mut().insert(handle.clone());
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;

    {
        let mut session = handle.lock().await;
        if let Err(e) = state.session_manager.finish(&mut session, Utc::now()).await {
            error!(error = %e, session_id = %session.id(), "Failed to save session");
        }
    }

    if let Some(value) = handle.directive().await.header_value(config) {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => error!(error = %e, "Invalid session cookie header"),
        }
    }

    response
}
