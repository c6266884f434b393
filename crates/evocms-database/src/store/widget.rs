//! Widget containers and widgets.

use async_trait::async_trait;

use evocms_core::result::AppResult;
use evocms_core::types::{CollectionId, ContainerId};
use evocms_entity::widget::{Widget, WidgetContainer};

/// Read access to widget containers.
#[async_trait]
pub trait WidgetStore: Send + Sync + 'static {
    /// Find a container of a collection by code.
    async fn find_container(
        &self,
        coll_id: CollectionId,
        code: &str,
    ) -> AppResult<Option<WidgetContainer>>;

    /// All containers of a collection ordered by `sort_order`.
    async fn list_containers(&self, coll_id: CollectionId) -> AppResult<Vec<WidgetContainer>>;

    /// All widgets of a container ordered by `sort_order`, enabled or not.
    async fn list_widgets(&self, container_id: ContainerId) -> AppResult<Vec<Widget>>;
}
