//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `tarjeta-store-fs`). The web
//! layer depends on this abstraction, not on any concrete backend.
//!
//! All artifacts for one person share the same slug; a second save under
//! the same slug overwrites the first (last writer wins, no coordination).

use std::future::Future;

use crate::{record::Record, slug::Slug};

/// Implemented by backend error types so generic callers can tell "nothing
/// stored under this slug" apart from a real storage failure. The web
/// layer maps the former to a not-found response and the latter to a
/// server error.
pub trait StoreError: std::error::Error {
  fn is_not_found(&self) -> bool;
}

/// Abstraction over a per-slug record-and-artifact store.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded async runtime (tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: StoreError + Send + Sync + 'static;

  // ── Records ───────────────────────────────────────────────────────────

  /// Persist `record` under `slug`, overwriting any prior record.
  fn save_record<'a>(
    &'a self,
    slug: &'a Slug,
    record: &'a Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Load the record stored under `slug`. Fails with a NotFound-kind
  /// error when no record exists there.
  fn load_record<'a>(
    &'a self,
    slug: &'a Slug,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + 'a;

  // ── Photos ────────────────────────────────────────────────────────────

  /// Store photo bytes for `slug`, overwriting any prior photo.
  fn store_photo<'a>(
    &'a self,
    slug: &'a Slug,
    bytes: &'a [u8],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Load the photo stored for `slug`; NotFound-kind error when absent.
  fn load_photo<'a>(
    &'a self,
    slug: &'a Slug,
  ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send + 'a;

  /// Whether a photo has been materialized for `slug`. Absence is a
  /// valid state, not an error.
  fn photo_exists<'a>(
    &'a self,
    slug: &'a Slug,
  ) -> impl Future<Output = bool> + Send + 'a;

  // ── QR images ─────────────────────────────────────────────────────────

  /// Store the rendered QR image for `slug`.
  fn store_qr<'a>(
    &'a self,
    slug: &'a Slug,
    bytes: &'a [u8],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Load the QR image for `slug`; NotFound-kind error when absent.
  fn load_qr<'a>(
    &'a self,
    slug: &'a Slug,
  ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send + 'a;
}
