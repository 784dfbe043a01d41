//! Filesystem backend for the tarjeta record store.
//!
//! One pretty-printed JSON record file, one photo file and one QR image
//! per slug, each under its own configurable directory. Overwrites are
//! plain single-file rewrites; concurrent writers to the same slug are
//! last-write-wins.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{FsStore, StorageLayout};
