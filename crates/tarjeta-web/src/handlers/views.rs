//! HTML view handlers: landing page, form, card views, result page.

use axum::{
  extract::{Path, State},
  response::Html,
};
use tarjeta_core::store::RecordStore;

use crate::{AppState, error::Error, handlers::parse_slug, pages};

pub async fn index() -> Html<String> {
  Html(pages::index())
}

pub async fn form() -> Html<String> {
  Html(pages::form())
}

pub async fn card<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let slug = parse_slug(&slug)?;
  let record = state.store.load_record(&slug).await.map_err(Error::store)?;
  Ok(Html(pages::card(&record, &slug)))
}

pub async fn icard<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let slug = parse_slug(&slug)?;
  let record = state.store.load_record(&slug).await.map_err(Error::store)?;
  Ok(Html(pages::icard(&record, &slug)))
}

pub async fn result<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let slug = parse_slug(&slug)?;
  let record = state.store.load_record(&slug).await.map_err(Error::store)?;
  Ok(Html(pages::result(&record, &slug)))
}
