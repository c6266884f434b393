//! # evocms-api
//!
//! HTTP layer for evocms built on Axum.
//!
//! Every request passes through the session middleware, which resumes or
//! starts the visitor's session, logs the hit and saves the session once
//! the handler is done. The REST dispatcher under `/api/v1` answers with
//! JSON; widget containers are served as HTML fragments.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod rest;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
