//! [`FsStore`] — the filesystem implementation of [`RecordStore`].

use std::path::{Path, PathBuf};

use tarjeta_core::{Record, Slug, store::RecordStore};
use tokio::fs;

use crate::{Error, Result};

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Where each artifact class lives. The three roots are independently
/// configurable; every file within them is named `<slug>.<ext>`.
#[derive(Debug, Clone)]
pub struct StorageLayout {
  pub data_dir:   PathBuf,
  pub photos_dir: PathBuf,
  pub qrs_dir:    PathBuf,
}

impl StorageLayout {
  /// The conventional layout under a single base directory.
  pub fn under(base: impl AsRef<Path>) -> StorageLayout {
    let base = base.as_ref();
    StorageLayout {
      data_dir:   base.join("data"),
      photos_dir: base.join("photos"),
      qrs_dir:    base.join("qrs"),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by plain files.
///
/// Cloning is cheap; the layout paths are read-only after [`FsStore::open`]
/// has created the directories.
#[derive(Debug, Clone)]
pub struct FsStore {
  layout: StorageLayout,
}

impl FsStore {
  /// Create the storage directories (idempotent) and return the store.
  pub async fn open(layout: StorageLayout) -> Result<Self> {
    for dir in [&layout.data_dir, &layout.photos_dir, &layout.qrs_dir] {
      fs::create_dir_all(dir).await?;
    }
    Ok(FsStore { layout })
  }

  fn record_path(&self, slug: &Slug) -> PathBuf {
    self.layout.data_dir.join(format!("{slug}.json"))
  }

  fn photo_path(&self, slug: &Slug) -> PathBuf {
    self.layout.photos_dir.join(format!("{slug}.jpg"))
  }

  fn qr_path(&self, slug: &Slug) -> PathBuf {
    self.layout.qrs_dir.join(format!("{slug}.png"))
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for FsStore {
  type Error = Error;

  async fn save_record(&self, slug: &Slug, record: &Record) -> Result<()> {
    // Pretty-printed so record files stay human-diffable.
    let json = serde_json::to_string_pretty(record)?;
    fs::write(self.record_path(slug), json).await?;
    tracing::debug!(%slug, "record saved");
    Ok(())
  }

  async fn load_record(&self, slug: &Slug) -> Result<Record> {
    let bytes = match fs::read(self.record_path(slug)).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(Error::RecordNotFound(slug.to_string()));
      }
      Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
  }

  async fn store_photo(&self, slug: &Slug, bytes: &[u8]) -> Result<()> {
    fs::write(self.photo_path(slug), bytes).await?;
    Ok(())
  }

  async fn load_photo(&self, slug: &Slug) -> Result<Vec<u8>> {
    match fs::read(self.photo_path(slug)).await {
      Ok(bytes) => Ok(bytes),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        Err(Error::PhotoNotFound(slug.to_string()))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn photo_exists(&self, slug: &Slug) -> bool {
    fs::try_exists(self.photo_path(slug)).await.unwrap_or(false)
  }

  async fn store_qr(&self, slug: &Slug, bytes: &[u8]) -> Result<()> {
    fs::write(self.qr_path(slug), bytes).await?;
    Ok(())
  }

  async fn load_qr(&self, slug: &Slug) -> Result<Vec<u8>> {
    match fs::read(self.qr_path(slug)).await {
      Ok(bytes) => Ok(bytes),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        Err(Error::QrNotFound(slug.to_string()))
      }
      Err(e) => Err(e.into()),
    }
  }
}
