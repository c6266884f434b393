//! Integration tests driving the full router against the in-memory backend.

mod helpers;

mod rest_test;
mod session_test;
mod widget_test;
