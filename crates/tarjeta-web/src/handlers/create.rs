//! Submission handlers — manual form and bulk spreadsheet.
//!
//! Both feed every record through the same pipeline:
//! slug → photo → persist → QR. A bulk row failure is reported in the
//! summary but never aborts the batch.

use axum::{
  extract::{Multipart, State},
  response::{Html, Redirect},
};
use bytes::Bytes;
use tarjeta_core::{Record, Slug, store::RecordStore};

use crate::{
  AppState,
  bulk::{self, RowOutcome},
  error::Error,
  pages,
  photo::{self, PhotoOutcome},
  qr,
};

// ─── Shared pipeline ─────────────────────────────────────────────────────────

/// Create (or overwrite) the card stored under `slug`.
///
/// Collisions are not detected: a second name normalizing to the same
/// slug replaces the first record and all of its artifacts.
async fn create_card<S>(
  state: &AppState<S>,
  slug: &Slug,
  mut record: Record,
  upload: Option<Bytes>,
) -> Result<PhotoOutcome, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let outcome = photo::resolve(
    state.store.as_ref(),
    &state.http,
    slug,
    &record.photo,
    upload,
  )
  .await
  .map_err(Error::store)?;

  // A photo stored by an earlier submission under the same slug still
  // counts as local.
  record.has_local_photo =
    outcome.stored() || state.store.photo_exists(slug).await;

  state
    .store
    .save_record(slug, &record)
    .await
    .map_err(Error::store)?;

  match state.config.icard_url(slug) {
    Some(url) => {
      let png = qr::qr_png(&url)?;
      state.store.store_qr(slug, &png).await.map_err(Error::store)?;
    }
    None => tracing::warn!(%slug, "base_url not configured, skipping QR"),
  }

  Ok(outcome)
}

// ─── Manual submission ───────────────────────────────────────────────────────

pub async fn manual<S>(
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<Redirect, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut record = Record::default();
  let mut upload: Option<Bytes> = None;

  while let Some(field) = multipart.next_field().await? {
    let Some(name) = field.name().map(str::to_string) else {
      continue;
    };
    match name.as_str() {
      "photo_file" => {
        let bytes = field.bytes().await?;
        if !bytes.is_empty() {
          upload = Some(bytes);
        }
      }
      "given_name" => record.given_name = field.text().await?,
      "family_name" => record.family_name = field.text().await?,
      "title" => record.title = field.text().await?,
      "department" => record.department = field.text().await?,
      "email" => record.email = field.text().await?,
      "mobile" => record.mobile = field.text().await?,
      "address" => record.address = field.text().await?,
      "website" => record.website = field.text().await?,
      "photo" => record.photo = field.text().await?,
      _ => {}
    }
  }

  record.trim();
  let slug = record.slug();
  create_card(&state, &slug, record, upload).await?;
  tracing::info!(%slug, "card created");

  Ok(Redirect::to(&format!("/result/{slug}")))
}

// ─── Bulk submission ─────────────────────────────────────────────────────────

pub async fn bulk<S>(
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<Html<String>, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut sheet: Option<Bytes> = None;

  while let Some(field) = multipart.next_field().await? {
    if field.name() == Some("xlsx") {
      let bytes = field.bytes().await?;
      if !bytes.is_empty() {
        sheet = Some(bytes);
      }
    }
  }

  let sheet = sheet.ok_or_else(|| {
    Error::BadRequest("missing spreadsheet upload (field \"xlsx\")".to_string())
  })?;

  let rows = bulk::parse_xlsx(&sheet)?;
  let mut outcomes = Vec::with_capacity(rows.len());

  for (row, mut record) in rows {
    record.trim();
    let slug = record.slug();
    match create_card(&state, &slug, record, None).await {
      Ok(_) => outcomes.push(RowOutcome::Created { row, slug }),
      Err(e) => {
        tracing::warn!(row, error = %e, "bulk row failed");
        outcomes.push(RowOutcome::Failed {
          row,
          reason: e.to_string(),
        });
      }
    }
  }
  tracing::info!(rows = outcomes.len(), "bulk run finished");

  Ok(Html(pages::bulk_summary(&outcomes)))
}
