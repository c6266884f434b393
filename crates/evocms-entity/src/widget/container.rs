//! Widget container model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{CollectionId, ContainerId};

/// A named slot of a collection that holds an ordered list of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WidgetContainer {
    /// Container identifier.
    pub id: ContainerId,
    /// Owning collection.
    pub coll_id: CollectionId,
    /// Code, unique within the collection.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Display order.
    pub sort_order: i32,
}
