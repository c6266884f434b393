//! Items (posts, pages, intros, ...) and their attachments.

pub mod attachment;
pub mod item_type;
pub mod model;

pub use attachment::{Attachment, MediaFile};
pub use item_type::{ItemType, TypeUsage};
pub use model::{Item, ItemStatus};
