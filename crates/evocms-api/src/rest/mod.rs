//! REST dispatcher mounted under `/api/v1`.
//!
//! The request path after the prefix is split on `/`: the first segment
//! names the module, later segments select the controller and its
//! arguments. Every failure is an [`ApiHalt`] rendered as the
//! `{code, message, data: {status}}` envelope.

pub mod collections;
pub mod halt;
pub mod query;
pub mod response;
pub mod users;

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use tracing::debug;

use evocms_auth::Session;
use evocms_core::types::UserId;

use crate::state::AppState;

pub use halt::ApiHalt;
pub use query::RestQuery;
pub use response::RestResponse;

/// Everything a controller needs besides its path arguments.
pub struct RestCall<'a> {
    /// Shared services.
    pub state: &'a AppState,
    /// The visitor's session.
    pub session: &'a mut Session,
    /// Query string parameters.
    pub query: &'a RestQuery,
    /// Request time.
    pub now: DateTime<Utc>,
}

impl RestCall<'_> {
    /// Logged in user, if any.
    pub fn viewer(&self) -> Option<UserId> {
        self.session.user_id()
    }
}

/// A parsed REST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestApi {
    args: Vec<String>,
}

impl RestApi {
    /// Split the request string found after `/api/v1/`, e.g.
    /// `collections/blog/posts`. A trailing slash is ignored.
    pub fn new(request: &str) -> Self {
        let request = request.trim_start_matches('/').trim_end_matches('/');
        let args = if request.is_empty() {
            Vec::new()
        } else {
            request.split('/').map(str::to_string).collect()
        };
        Self { args }
    }

    /// Module name, empty when missing.
    pub fn module(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    /// Percent-decoded argument `index`; `None` when missing or empty.
    pub fn arg(&self, index: usize) -> Option<Cow<'_, str>> {
        self.args
            .get(index)
            .filter(|a| !a.is_empty())
            .map(|a| percent_decode_str(a).decode_utf8_lossy())
    }

    /// Argument `index` decoded like a form value, `+` meaning space.
    pub fn arg_form_decoded(&self, index: usize) -> Option<String> {
        self.args.get(index).filter(|a| !a.is_empty()).map(|a| {
            let spaced = a.replace('+', " ");
            percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
        })
    }

    /// Run the module named by the first argument.
    pub async fn execute(&self, call: &mut RestCall<'_>) -> Result<RestResponse, ApiHalt> {
        debug!(module = self.module(), args = ?self.args, "REST request");
        match self.module() {
            "" => Err(ApiHalt::wrong_route("Module is not defined")),
            "collections" => collections::module(self, call).await,
            "users" => users::module(self, call).await,
            other => Err(ApiHalt::not_found(
                "unknown_module",
                format!("Unknown module \"{other}\""),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_request() {
        let api = RestApi::new("collections/blog/posts/");
        assert_eq!(api.module(), "collections");
        assert_eq!(api.arg(1).as_deref(), Some("blog"));
        assert_eq!(api.arg(2).as_deref(), Some("posts"));
        assert_eq!(api.arg(3), None);
    }

    #[test]
    fn test_empty_request_has_no_module() {
        assert_eq!(RestApi::new("").module(), "");
        assert_eq!(RestApi::new("/").module(), "");
    }

    #[test]
    fn test_decoding() {
        let api = RestApi::new("collections/blog/search/hello%20big+world");
        assert_eq!(api.arg(3).as_deref(), Some("hello big+world"));
        assert_eq!(api.arg_form_decoded(3).as_deref(), Some("hello big world"));
    }

    #[test]
    fn test_empty_segment_is_missing() {
        let api = RestApi::new("collections//items");
        assert_eq!(api.arg(1), None);
        assert_eq!(api.arg(2).as_deref(), Some("items"));
    }
}
