//! `collections` module: collection list, items, posts and search.

use tracing::debug;

use evocms_auth::CollectionAccess;
use evocms_core::types::ItemId;
use evocms_entity::collection::Collection;
use evocms_service::ItemListRequest;
use evocms_service::search::SearchKind;

use super::{ApiHalt, RestApi, RestCall, RestResponse};

/// Route `collections/<urlname>/<controller>/...`.
pub(super) async fn module(
    api: &RestApi,
    call: &mut RestCall<'_>,
) -> Result<RestResponse, ApiHalt> {
    let controller = api.arg(2).map_or_else(|| "list".to_string(), |c| c.into_owned());
    if controller == "list" {
        return list(call).await;
    }

    let Some(urlname) = api.arg(1) else {
        return Err(ApiHalt::wrong_route("Collection name is not defined"));
    };
    let collection = call
        .state
        .stores
        .collections
        .find_by_urlname(&urlname)
        .await?
        .ok_or_else(|| {
            ApiHalt::not_found(
                "unknown_collection",
                format!("No collection found in DB by requested url name \"{urlname}\""),
            )
        })?;

    match call
        .state
        .access
        .collection_access(&collection, call.viewer())
        .await?
    {
        CollectionAccess::Granted => {}
        CollectionAccess::RequiresLogin => {
            return Err(ApiHalt::forbidden(
                "access_requires_login",
                "You need to log in before you can access this section.",
            ));
        }
        CollectionAccess::Denied => {
            return Err(ApiHalt::forbidden(
                "access_denied",
                "You are not a member of this section, therefore you are not allowed to access it.",
            ));
        }
    }

    match controller.as_str() {
        "items" => items(api, call, &collection, false).await,
        "posts" => items(api, call, &collection, true).await,
        "search" => search(api, call, &collection).await,
        other => Err(ApiHalt::not_found(
            "unknown_controller",
            format!("Unknown collection controller \"{other}\""),
        )),
    }
}

/// Collections listed for the current viewer.
async fn list(call: &mut RestCall<'_>) -> Result<RestResponse, ApiHalt> {
    let viewer = call.viewer();
    let mut response = RestResponse::new();
    for collection in call.state.stores.collections.list_all().await? {
        if !call.state.access.is_listed(&collection, viewer).await? {
            continue;
        }
        response.push(serde_json::json!({
            "id": collection.id,
            "urlname": collection.urlname,
            "kind": collection.kind,
            "shortname": collection.shortname,
            "name": collection.name,
            "tagline": collection.tagline,
            "desc": collection.longdesc,
        }))?;
    }

    if response.is_empty() {
        return Err(ApiHalt::empty("no_collections", "No collections found"));
    }
    Ok(response)
}

/// One item (`args[3]`) or a page of items.
async fn items(
    api: &RestApi,
    call: &mut RestCall<'_>,
    collection: &Collection,
    posts_only: bool,
) -> Result<RestResponse, ApiHalt> {
    let content = &call.state.content_service;
    let mut response = RestResponse::new();

    if let Some(raw_id) = api.arg(3).filter(|id| id != "0") {
        let invalid = || ApiHalt::not_found("post_invalid_id", "Invalid post ID");
        let id: i64 = raw_id.parse().map_err(|_| invalid())?;
        let item = content
            .get(collection, ItemId(id), posts_only)
            .await?
            .ok_or_else(invalid)?;
        response.replace(item)?;
        return Ok(response);
    }

    let request = ItemListRequest {
        page: call.query.page_u64(),
        per_page: call.query.per_page(),
        type_ids: call.query.type_ids(),
        keywords: call.query.s.clone(),
        tag: call.query.tag.clone(),
        posts_only,
    };
    let page = content.list(collection, &request).await?;
    if page.items.is_empty() {
        return Err(ApiHalt::empty(
            "no_posts",
            "No posts found for requested collection",
        ));
    }

    response.add_integer("found", page.total_items as i64);
    response.add_integer("page", page.page as i64);
    response.add_integer("page_size", page.page_size as i64);
    response.add_integer("pages_total", page.total_pages as i64);
    for item in page.items {
        response.push_to("items", item)?;
    }
    Ok(response)
}

/// Scored search over items, comments, chapters and tags.
async fn search(
    api: &RestApi,
    call: &mut RestCall<'_>,
    collection: &Collection,
) -> Result<RestResponse, ApiHalt> {
    let keywords = api.arg_form_decoded(3).unwrap_or_default();
    let kinds = SearchKind::parse_list(call.query.kind());
    debug!(coll = %collection.urlname, keywords = %keywords, ?kinds, "Search");

    let page = call
        .state
        .search_service
        .search(
            &mut *call.session,
            collection,
            &keywords,
            &kinds,
            call.query.page(),
            call.query.per_page(),
            call.now,
        )
        .await?
        .ok_or_else(|| {
            ApiHalt::empty(
                "no_search_results",
                "Sorry, we could not find anything matching your request, please try to broaden your search.",
            )
        })?;

    let mut response = RestResponse::new();
    response.add_integer("found", page.found as i64);
    response.add_integer("page", page.page as i64);
    response.add_integer("page_size", page.page_size as i64);
    response.add_integer("pages_total", page.pages_total as i64);
    for result in page.results {
        response.push_to("results", result)?;
    }
    Ok(response)
}
