//! Published content of a collection: item lists, single items and their
//! attachments.

pub mod attachments;
pub mod excerpt;
pub mod service;

pub use attachments::AttachmentView;
pub use service::{ContentService, ItemListRequest, ItemView};
