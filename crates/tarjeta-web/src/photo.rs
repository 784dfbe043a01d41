//! Photo resolution — materializes a profile image for a record.
//!
//! Sources are tried in strict order, first success wins: uploaded bytes,
//! local absolute path, remote URL. Fetch and read failures degrade
//! silently to "no photo" (logged at WARN, never surfaced to the user);
//! only store-write failures propagate.

use std::path::Path;

use bytes::Bytes;
use tarjeta_core::{Slug, store::RecordStore};

/// Which of the three sources produced the stored photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource {
  Upload,
  LocalFile,
  Remote,
}

/// The typed result of a resolution attempt. Distinguishes "no photo was
/// requested" from "a photo was requested but could not be obtained".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOutcome {
  Stored(PhotoSource),
  Failed,
  NotRequested,
}

impl PhotoOutcome {
  pub fn stored(self) -> bool {
    matches!(self, PhotoOutcome::Stored(_))
  }
}

/// Try to materialize a photo for `slug`.
///
/// `reference` is the free-form photo field from the submission (remote
/// URL or local absolute path); `upload` is the raw multipart file, if
/// any. The caller's `http` client carries the fetch timeout.
pub async fn resolve<S: RecordStore>(
  store: &S,
  http: &reqwest::Client,
  slug: &Slug,
  reference: &str,
  upload: Option<Bytes>,
) -> Result<PhotoOutcome, S::Error> {
  // 1. Uploaded bytes, stored verbatim.
  if let Some(bytes) = upload
    && !bytes.is_empty()
  {
    store.store_photo(slug, &bytes).await?;
    return Ok(PhotoOutcome::Stored(PhotoSource::Upload));
  }

  let reference = reference.trim();
  if reference.is_empty() {
    return Ok(PhotoOutcome::NotRequested);
  }

  // 2. Local absolute path that exists.
  let path = Path::new(reference);
  if path.is_absolute() && tokio::fs::try_exists(path).await.unwrap_or(false) {
    return match tokio::fs::read(path).await {
      Ok(bytes) => {
        store.store_photo(slug, &bytes).await?;
        Ok(PhotoOutcome::Stored(PhotoSource::LocalFile))
      }
      Err(e) => {
        tracing::warn!(path = %reference, error = %e, "local photo unreadable");
        Ok(PhotoOutcome::Failed)
      }
    };
  }

  // 3. Remote URL, best-effort.
  let lower = reference.to_ascii_lowercase();
  if lower.starts_with("http://") || lower.starts_with("https://") {
    return match http.get(reference).send().await {
      Ok(resp) if resp.status() == reqwest::StatusCode::OK => {
        match resp.bytes().await {
          Ok(bytes) => {
            store.store_photo(slug, &bytes).await?;
            Ok(PhotoOutcome::Stored(PhotoSource::Remote))
          }
          Err(e) => {
            tracing::warn!(url = %reference, error = %e, "photo body read failed");
            Ok(PhotoOutcome::Failed)
          }
        }
      }
      Ok(resp) => {
        tracing::warn!(url = %reference, status = %resp.status(), "photo fetch returned non-200");
        Ok(PhotoOutcome::Failed)
      }
      Err(e) => {
        tracing::warn!(url = %reference, error = %e, "photo fetch failed");
        Ok(PhotoOutcome::Failed)
      }
    };
  }

  tracing::warn!(reference = %reference, "unusable photo reference");
  Ok(PhotoOutcome::Failed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
