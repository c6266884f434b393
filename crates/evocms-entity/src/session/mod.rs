//! Session rows and the serialized key/value payload they carry.

pub mod data;
pub mod model;

pub use data::{DataEntry, SessionData};
pub use model::{NewSession, SessionRow, SessionUpdate};
