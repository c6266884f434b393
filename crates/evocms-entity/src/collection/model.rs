//! Collection entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::CollectionId;

use super::access::{AccessLevel, ListingVisibility};

/// A collection (blog) hosted by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Collection {
    /// Unique collection identifier.
    pub id: CollectionId,
    /// URL name, unique across collections.
    pub urlname: String,
    /// Collection kind, e.g. `std`, `photo`, `forum`, `manual`.
    pub kind: String,
    /// Short name.
    pub shortname: String,
    /// Full name.
    pub name: String,
    /// Tagline.
    pub tagline: String,
    /// Long description.
    pub longdesc: String,
    /// Who may read content.
    pub access: AccessLevel,
    /// Where the collection is listed.
    pub listing: ListingVisibility,
    /// Display order in listings.
    pub sort_order: i32,
}

impl Collection {
    /// Front page URL of the collection under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self.urlname)
    }
}
