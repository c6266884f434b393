//! `users` module: user directory and profiles.

use evocms_core::types::UserId;

use super::{ApiHalt, RestApi, RestCall, RestResponse};

const LIST_ACCESS_MESSAGE: &str = "You must log in to see the user directory.";
const PROFILE_ACCESS_MESSAGE: &str = "You must log in to see user profiles.";

/// Route `users` and `users/<id>`.
pub(super) async fn module(
    api: &RestApi,
    call: &mut RestCall<'_>,
) -> Result<RestResponse, ApiHalt> {
    let controller = api.arg(1).map_or_else(|| "list".to_string(), |c| c.into_owned());
    if let Some(id) = controller.parse::<i64>().ok().filter(|id| *id > 0) {
        return view(call, UserId(id)).await;
    }
    match controller.as_str() {
        "list" => list(call).await,
        other => Err(ApiHalt::not_found(
            "unknown_controller",
            format!("Unknown user controller \"{other}\""),
        )),
    }
}

async fn list(call: &mut RestCall<'_>) -> Result<RestResponse, ApiHalt> {
    if !call.state.access.can_list_users(call.viewer()) {
        return Err(ApiHalt::empty("no_access", LIST_ACCESS_MESSAGE));
    }

    let page = call
        .state
        .user_directory
        .list(
            call.query.keywords.as_deref(),
            call.query.page_u64(),
            call.query.per_page(),
        )
        .await?;
    if page.items.is_empty() {
        return Err(ApiHalt::empty("no_users", "No users found"));
    }

    let mut response = RestResponse::new();
    response.add_integer("found", page.total_items as i64);
    response.add_integer("page", page.page as i64);
    response.add_integer("page_size", page.page_size as i64);
    response.add_integer("pages_total", page.total_pages as i64);
    for user in page.items {
        response.push_to("users", user)?;
    }
    Ok(response)
}

async fn view(call: &mut RestCall<'_>, id: UserId) -> Result<RestResponse, ApiHalt> {
    let viewer = call.viewer();
    if !call.state.access.can_view_profile(viewer) {
        return Err(ApiHalt::empty("no_access", PROFILE_ACCESS_MESSAGE));
    }

    let profile = call
        .state
        .user_directory
        .view(id, viewer.is_some())
        .await?
        .ok_or_else(|| ApiHalt::not_found("user_invalid_id", "Invalid user ID"))?;

    let mut response = RestResponse::new();
    response.replace(profile)?;
    Ok(response)
}
