//! Entry point of the REST API.

use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::response::{IntoResponse, Response};

use crate::extractors::CurrentSession;
use crate::rest::{ApiHalt, RestApi, RestCall, RestQuery};
use crate::state::AppState;

/// Path prefix of the REST API.
pub const REST_PREFIX: &str = "/api/v1";

/// GET /api/v1/{*request}
pub async fn dispatch(
    State(state): State<AppState>,
    CurrentSession(handle): CurrentSession,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<RestQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable REST query string");
            return ApiHalt::invalid_query(rejection.body_text()).into_response();
        }
    };

    // The raw path keeps encoded slashes inside arguments intact.
    let request = uri.path().strip_prefix(REST_PREFIX).unwrap_or_default();
    let api = RestApi::new(request);

    let mut session = handle.lock().await;
    let mut call = RestCall {
        state: &state,
        session: &mut *session,
        query: &query,
        now: chrono::Utc::now(),
    };

    match api.execute(&mut call).await {
        Ok(response) => response.into_response(),
        Err(halt) => {
            tracing::debug!(code = halt.code, status = %halt.status, "REST request halted");
            halt.into_response()
        }
    }
}
