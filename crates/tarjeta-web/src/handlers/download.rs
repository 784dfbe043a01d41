//! Binary/artifact handlers: QR image, vCard file, photo, logo.

use axum::{
  body::Body,
  extract::{Path, State},
  http::{StatusCode, header},
  response::Response,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tarjeta_core::store::RecordStore;

use crate::{AppState, error::Error, handlers::parse_slug};

/// RFC 5987 value-chars, approximated as "unreserved characters only".
const FILENAME_SET: &AsciiSet =
  &NON_ALPHANUMERIC.remove(b'.').remove(b'_').remove(b'-');

pub async fn qr<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let slug = parse_slug(&slug)?;
  let bytes = state.store.load_qr(&slug).await.map_err(Error::store)?;

  Ok(
    Response::builder()
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, "image/png")
      .header(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{slug}.png\""),
      )
      .header(header::CONTENT_LENGTH, bytes.len())
      .body(Body::from(bytes))
      .unwrap(),
  )
}

pub async fn vcf<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let slug = parse_slug(&slug)?;
  let record = state.store.load_record(&slug).await.map_err(Error::store)?;

  // Recomputed fresh from the stored record on every download; there is
  // no at-rest copy to go stale.
  let hosted = if state.store.photo_exists(&slug).await {
    state.config.photo_url(&slug)
  } else {
    None
  };
  let text =
    tarjeta_vcard::vcard(&record, hosted.as_deref(), &state.config.org_name);

  let stem = if record.given_name.is_empty() && record.family_name.is_empty() {
    slug.to_string()
  } else {
    format!("{}_{}", record.given_name, record.family_name)
  };
  let filename =
    utf8_percent_encode(&format!("{stem}.vcf"), FILENAME_SET).to_string();

  Ok(
    Response::builder()
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, "text/vcard; charset=utf-8")
      .header(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename*=UTF-8''{filename}"),
      )
      .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
      .header(header::CONTENT_LENGTH, text.len())
      .body(Body::from(text))
      .unwrap(),
  )
}

pub async fn photo<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let slug = parse_slug(&slug)?;
  let bytes = state.store.load_photo(&slug).await.map_err(Error::store)?;

  Ok(
    Response::builder()
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, "image/jpeg")
      .header(header::CONTENT_LENGTH, bytes.len())
      .body(Body::from(bytes))
      .unwrap(),
  )
}

pub async fn logo<S>(
  State(state): State<AppState<S>>,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let bytes = match tokio::fs::read(&state.config.logo_path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(Error::NotFound);
    }
    Err(e) => return Err(Error::Store(Box::new(e))),
  };

  Ok(
    Response::builder()
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, "image/png")
      .header(header::CONTENT_LENGTH, bytes.len())
      .body(Body::from(bytes))
      .unwrap(),
  )
}
