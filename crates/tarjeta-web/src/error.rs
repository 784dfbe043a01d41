//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use tarjeta_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("multipart error: {0}")]
  Multipart(#[from] axum::extract::multipart::MultipartError),

  #[error("spreadsheet error: {0}")]
  Spreadsheet(#[from] calamine::XlsxError),

  #[error("qr error: {0}")]
  Qr(#[from] crate::qr::QrError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error, collapsing its NotFound kind into
  /// [`Error::NotFound`] so it surfaces as a 404 rather than a 500.
  pub fn store<E>(e: E) -> Self
  where
    E: StoreError + Send + Sync + 'static,
  {
    if e.is_not_found() {
      Error::NotFound
    } else {
      Error::Store(Box::new(e))
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Error::BadRequest(msg) => {
        (StatusCode::BAD_REQUEST, msg).into_response()
      }
      Error::Multipart(e) => {
        (StatusCode::BAD_REQUEST, e.to_string()).into_response()
      }
      Error::Spreadsheet(e) => (
        StatusCode::BAD_REQUEST,
        format!("unreadable spreadsheet: {e}"),
      )
        .into_response(),
      Error::Qr(e) => {
        tracing::error!(error = %e, "qr generation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store error");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
