//! Widget containers rendered to HTML.
//!
//! Containers can embed other containers through the `subcontainer` and
//! `subcontainer_row` widgets. The renderer tracks which containers are
//! being rendered and refuses to enter one twice on the same branch.

pub mod kind;
pub mod params;
pub mod renderer;

pub use kind::WidgetKind;
pub use params::{DisplayParams, ParamDefinition, ParamKind};
pub use renderer::WidgetRenderer;
