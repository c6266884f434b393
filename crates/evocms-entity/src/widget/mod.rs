//! Widget containers and widget instances.

pub mod container;
pub mod model;

pub use container::WidgetContainer;
pub use model::Widget;
