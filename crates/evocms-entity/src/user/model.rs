//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::UserId;

/// Declared gender of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `M`
    Male,
    /// `F`
    Female,
    /// `O`
    Other,
}

impl Gender {
    /// One-letter code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name.
    pub login: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Nickname.
    pub nickname: String,
    /// City name, empty when unknown.
    pub city: String,
    /// Declared gender.
    pub gender: Option<Gender>,
    /// Avatar path relative to the media root.
    pub avatar_path: Option<String>,
    /// Whether the account is closed.
    pub closed: bool,
}

impl User {
    /// Full name: first and last name joined, falling back to the nickname.
    pub fn fullname(&self) -> String {
        let full = format!("{} {}", self.firstname.trim(), self.lastname.trim());
        let full = full.trim();
        if full.is_empty() {
            self.nickname.clone()
        } else {
            full.to_string()
        }
    }
}
