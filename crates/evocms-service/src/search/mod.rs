//! Scored search over the items, comments, categories and tags of a
//! collection. Results are kept in the visitor's session so paging through
//! them does not search again.

pub mod scoring;
pub mod service;

pub use scoring::{ScoredResult, SearchKind};
pub use service::{SearchPage, SearchResultView, SearchService};
