//! Widget container pages.

use axum::extract::{Path, State};
use axum::response::Html;

use evocms_auth::CollectionAccess;
use evocms_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::Visitor;
use crate::state::AppState;

/// GET /{coll_urlname}/containers/{code}
pub async fn render_container(
    State(state): State<AppState>,
    visitor: Visitor,
    Path((coll_urlname, code)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    let collection = state
        .stores
        .collections
        .find_by_urlname(&coll_urlname)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Unknown collection \"{coll_urlname}\"")))?;

    match state
        .access
        .collection_access(&collection, visitor.user_id)
        .await?
    {
        CollectionAccess::Granted => {}
        CollectionAccess::RequiresLogin => {
            return Err(AppError::authentication(
                "You need to log in before you can access this section.",
            )
            .into());
        }
        CollectionAccess::Denied => {
            return Err(AppError::authorization(
                "You are not a member of this section, therefore you are not allowed to access it.",
            )
            .into());
        }
    }

    let html = state
        .widget_renderer
        .render_container(&collection, &code)
        .await?;
    Ok(Html(html))
}
