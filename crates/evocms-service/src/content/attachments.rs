//! Item attachments as exposed by the API.

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use evocms_core::types::{FileId, ItemId, LinkId};
use evocms_entity::item::Attachment;

/// One attachment of an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentView {
    /// Link id.
    #[serde(rename = "link_ID")]
    pub link_id: LinkId,
    /// File id.
    #[serde(rename = "file_ID")]
    pub file_id: FileId,
    /// `dir` for directories, the file type otherwise.
    #[serde(rename = "type")]
    pub kind: String,
    /// Link position.
    pub position: String,
    /// File base name.
    pub name: String,
    /// Public URL.
    pub url: String,
    /// Title, empty when unset.
    pub title: String,
    /// Alternative text, empty when unset.
    pub alt: String,
    /// Description, empty when unset.
    pub desc: String,
}

/// Turn attachment rows into views, skipping links without a file row and
/// files missing from `media_root`.
pub async fn resolve(
    item_id: ItemId,
    attachments: Vec<Attachment>,
    media_root: &Path,
    media_base_url: &str,
) -> Vec<AttachmentView> {
    let mut views = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        let Some(file) = attachment.file else {
            warn!(
                link_id = %attachment.link_id,
                item_id = %item_id,
                "Link does not have a file object"
            );
            continue;
        };

        let full_path = media_root.join(file.path.trim_start_matches('/'));
        if !tokio::fs::try_exists(&full_path).await.unwrap_or(false) {
            warn!(
                item_id = %item_id,
                path = %full_path.display(),
                "Linked file does not exist"
            );
            continue;
        }

        views.push(AttachmentView {
            link_id: attachment.link_id,
            file_id: file.id,
            kind: if file.is_dir {
                "dir".to_string()
            } else {
                file.file_type.clone()
            },
            position: attachment.position,
            name: file.name().to_string(),
            url: file.url(media_base_url),
            title: file.title.unwrap_or_default(),
            alt: file.alt.unwrap_or_default(),
            desc: file.description.unwrap_or_default(),
        });
    }
    views
}
