//! # evocms-entity
//!
//! Domain entity models for evocms. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod chapter;
pub mod collection;
pub mod comment;
pub mod hit;
pub mod item;
pub mod session;
pub mod tag;
pub mod user;
pub mod widget;
