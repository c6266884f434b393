//! Request context carrying the visitor's session and identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use evocms_core::types::{SessionId, UserId};

/// Context for the current request.
///
/// Built by the session middleware and passed into service methods so
/// that every operation knows who is looking and from which session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The visitor's session.
    pub session_id: SessionId,
    /// Logged in user, if any.
    pub user_id: Option<UserId>,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(
        session_id: SessionId,
        user_id: Option<UserId>,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            session_id,
            user_id,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }
}
