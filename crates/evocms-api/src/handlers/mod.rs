//! HTTP handlers.

pub mod health;
pub mod rest;
pub mod widget;
