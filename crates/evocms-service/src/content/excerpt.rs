//! Plain-text excerpts.

use evocms_entity::item::Item;

use crate::html::{strip_tags, truncate_words};

/// Maximum excerpt length in characters.
pub const EXCERPT_LENGTH: usize = 254;

/// Plain-text excerpt of an HTML fragment.
pub fn excerpt(html: &str) -> String {
    truncate_words(&strip_tags(html), EXCERPT_LENGTH)
}

/// The item's own excerpt, or one generated from its content.
pub fn item_excerpt(item: &Item) -> String {
    if item.excerpt.trim().is_empty() {
        excerpt(&item.content)
    } else {
        item.excerpt.clone()
    }
}
