//! Links between items and media files.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{FileId, ItemId, LinkId};

/// A file from the media library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MediaFile {
    /// File identifier.
    pub id: FileId,
    /// Path relative to the media root.
    pub path: String,
    /// File type, e.g. `image`, `audio`, `other`.
    pub file_type: String,
    /// Whether the path names a directory.
    pub is_dir: bool,
    /// Title.
    pub title: Option<String>,
    /// Alternative text.
    pub alt: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl MediaFile {
    /// Base name of the file.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Public URL of the file under `media_base_url`.
    pub fn url(&self, media_base_url: &str) -> String {
        format!(
            "{}/{}",
            media_base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// An item attachment: the link row plus its file when the file row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Link identifier.
    pub link_id: LinkId,
    /// Owning item.
    pub item_id: ItemId,
    /// Position, e.g. `teaser`, `aftermore`, `inline`.
    pub position: String,
    /// Display order.
    pub order: i32,
    /// The linked file, `None` when the file row is gone.
    pub file: Option<MediaFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> MediaFile {
        MediaFile {
            id: FileId(1),
            path: path.to_string(),
            file_type: "image".to_string(),
            is_dir: false,
            title: None,
            alt: None,
            description: None,
        }
    }

    #[test]
    fn test_name_is_last_segment() {
        assert_eq!(file("blogs/a/photo.jpg").name(), "photo.jpg");
        assert_eq!(file("photo.jpg").name(), "photo.jpg");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        assert_eq!(
            file("/blogs/a/photo.jpg").url("http://x/media/"),
            "http://x/media/blogs/a/photo.jpg"
        );
    }
}
