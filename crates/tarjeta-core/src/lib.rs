//! Core types for the tarjeta card service.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod record;
pub mod slug;
pub mod store;

pub use error::{Error, Result};
pub use record::Record;
pub use slug::Slug;
