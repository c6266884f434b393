//! Session cookie value `"<id>_<key>"` and the `Set-Cookie` directive sent
//! back to the client.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use evocms_core::config::SessionConfig;
use evocms_core::types::SessionId;

static COOKIE_FORMAT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)_([A-Za-z0-9_]+)$").ok());

/// Parsed session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Session row id.
    pub id: SessionId,
    /// Session key.
    pub key: String,
}

impl SessionCookie {
    /// Parse a cookie value. Returns `None` when it does not look like
    /// `<digits>_<word chars>` or the id overflows.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = COOKIE_FORMAT.as_ref()?.captures(value)?;
        let id = captures.get(1)?.as_str().parse::<i64>().ok()?;
        let key = captures.get(2)?.as_str().to_string();
        Some(Self {
            id: SessionId(id),
            key,
        })
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.id, self.key)
    }
}

/// What the response must do with the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CookieDirective {
    /// Leave the client's cookie alone.
    #[default]
    Keep,
    /// Issue a new cookie.
    Set(SessionCookie),
    /// Expire the cookie.
    Clear,
}

impl CookieDirective {
    /// `Set-Cookie` header value for this directive, if any.
    pub fn header_value(&self, config: &SessionConfig) -> Option<String> {
        let (value, max_age) = match self {
            Self::Keep => return None,
            Self::Set(cookie) => (cookie.to_string(), config.cookie_lifetime_seconds),
            Self::Clear => (String::new(), 0),
        };

        let mut header = format!(
            "{}={}; Path={}; Max-Age={}; HttpOnly",
            config.cookie_name, value, config.cookie_path, max_age
        );
        if !config.cookie_domain.is_empty() {
            header.push_str("; Domain=");
            header.push_str(&config.cookie_domain);
        }
        Some(header)
    }
}
