//! Who may read a collection and where it is listed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Read access to a collection's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "coll_access", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Anyone, including anonymous visitors.
    Public,
    /// Any logged in user.
    Users,
    /// Only members of the collection.
    Members,
}

impl AccessLevel {
    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Users => "users",
            Self::Members => "members",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a collection shows up in collection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "coll_listing", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingVisibility {
    /// Listed for everybody.
    Public,
    /// Listed for logged in users.
    Logged,
    /// Listed for members only.
    Member,
    /// Never listed.
    Never,
}
