//! Cache key builders for all evocms cache entries.

use evocms_core::types::{CollectionId, WidgetId};

/// Prefix applied to all evocms cache keys.
const PREFIX: &str = "evocms";

/// Cache key for the rendered block of a widget in a collection.
pub fn widget_block(coll_id: CollectionId, widget_id: WidgetId) -> String {
    format!("{PREFIX}:block:{coll_id}:{widget_id}")
}

/// Prefix covering every cached block of a collection.
pub fn collection_blocks(coll_id: CollectionId) -> String {
    format!("{PREFIX}:block:{coll_id}:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_key_is_under_collection_prefix() {
        let key = widget_block(CollectionId(3), WidgetId(17));
        assert_eq!(key, "evocms:block:3:17");
        assert!(key.starts_with(&collection_blocks(CollectionId(3))));
        assert!(!key.starts_with(&collection_blocks(CollectionId(31))));
    }
}
