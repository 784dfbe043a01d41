//! Error type for `tarjeta-store-fs`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No record file exists under the requested slug.
  #[error("record not found: {0}")]
  RecordNotFound(String),

  /// No photo has been materialized for the requested slug.
  #[error("photo not found: {0}")]
  PhotoNotFound(String),

  /// No QR image has been rendered for the requested slug.
  #[error("qr image not found: {0}")]
  QrNotFound(String),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl tarjeta_core::store::StoreError for Error {
  fn is_not_found(&self) -> bool {
    matches!(
      self,
      Error::RecordNotFound(_) | Error::PhotoNotFound(_) | Error::QrNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
