//! Error types for `tarjeta-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record not found: {0}")]
  RecordNotFound(String),

  #[error("not a valid slug: {0:?}")]
  InvalidSlug(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
