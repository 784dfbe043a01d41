//! HTTP layer for tarjeta.
//!
//! Exposes an axum [`Router`] over any [`RecordStore`]: HTML views for
//! creating and showing cards, plus artifact downloads (QR image, vCard,
//! photo). The binary in `main.rs` wires it to the filesystem store.

pub mod bulk;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod photo;
pub mod qr;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use serde::Deserialize;
use tarjeta_core::{Slug, store::RecordStore};
use tower_http::trace::TraceLayer;

use handlers::{create, download, views};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TARJETA_*` environment variables. Every field has a default so the
/// server runs unconfigured with local directories, like a dev setup.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Externally resolvable base URL; embedded in QR codes and vCard
  /// photo URIs. Empty disables both (logged at WARN).
  pub base_url:   String,
  pub org_name:   String,
  pub data_dir:   PathBuf,
  pub photos_dir: PathBuf,
  pub qrs_dir:    PathBuf,
  pub logo_path:  PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      host:       "0.0.0.0".to_string(),
      port:       5000,
      base_url:   "http://localhost:5000".to_string(),
      org_name:   String::new(),
      data_dir:   PathBuf::from("data"),
      photos_dir: PathBuf::from("photos"),
      qrs_dir:    PathBuf::from("qrs"),
      logo_path:  PathBuf::from("static/logo.png"),
    }
  }
}

impl ServerConfig {
  fn external_url(&self, path: &str) -> Option<String> {
    let base = self.base_url.trim_end_matches('/');
    if base.is_empty() {
      None
    } else {
      Some(format!("{base}{path}"))
    }
  }

  /// Absolute URL of the photo-serving endpoint for `slug`.
  pub fn photo_url(&self, slug: &Slug) -> Option<String> {
    self.external_url(&format!("/photo/{slug}"))
  }

  /// Absolute URL of the mobile card view for `slug` — the QR target.
  pub fn icard_url(&self, slug: &Slug) -> Option<String> {
    self.external_url(&format!("/icard/{slug}"))
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  /// Shared client for remote photo fetches; carries the fetch timeout.
  pub http:   reqwest::Client,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the card service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/",             get(views::index))
    .route("/form",         get(views::form))
    .route("/cards",        post(create::manual::<S>))
    .route("/cards/bulk",   post(create::bulk::<S>))
    .route("/card/{slug}",  get(views::card::<S>))
    .route("/icard/{slug}", get(views::icard::<S>))
    .route("/result/{slug}", get(views::result::<S>))
    .route("/qr/{slug}",    get(download::qr::<S>))
    .route("/vcf/{slug}",   get(download::vcf::<S>))
    .route("/photo/{slug}", get(download::photo::<S>))
    .route("/logo.png",     get(download::logo::<S>))
    .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{sync::Arc, time::Duration};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tarjeta_core::{Record, store::RecordStore as _};
  use tarjeta_store_fs::{FsStore, StorageLayout};
  use tempfile::TempDir;
  use tower::ServiceExt as _;

  use super::*;

  const BOUNDARY: &str = "test-boundary";

  async fn make_state() -> (TempDir, AppState<FsStore>) {
    let dir = TempDir::new().unwrap();
    let store = FsStore::open(StorageLayout::under(dir.path()))
      .await
      .unwrap();

    let config = ServerConfig {
      host:       "127.0.0.1".to_string(),
      port:       5000,
      base_url:   "http://cards.test".to_string(),
      org_name:   "Acme".to_string(),
      data_dir:   dir.path().join("data"),
      photos_dir: dir.path().join("photos"),
      qrs_dir:    dir.path().join("qrs"),
      logo_path:  dir.path().join("logo.png"),
    };

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(1))
      .build()
      .unwrap();

    let state = AppState {
      store: Arc::new(store),
      config: Arc::new(config),
      http,
    };
    (dir, state)
  }

  fn text_part(name: &str, value: &str) -> String {
    format!(
      "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
  }

  fn file_part(name: &str, filename: &str, content: &str) -> String {
    format!(
      "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
    )
  }

  fn close_form(mut parts: String) -> String {
    parts.push_str(&format!("--{BOUNDARY}--\r\n"));
    parts
  }

  async fn send(
    state: AppState<FsStore>,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: String,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
      builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let req = builder.body(Body::from(body)).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn multipart_ct() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
  }

  async fn submit_card(
    state: AppState<FsStore>,
    fields: &[(&str, &str)],
  ) -> axum::response::Response {
    let mut parts = String::new();
    for (name, value) in fields {
      parts.push_str(&text_part(name, value));
    }
    send(
      state,
      "POST",
      "/cards",
      Some(&multipart_ct()),
      close_form(parts),
    )
    .await
  }

  // ── Static views ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn index_links_to_the_form() {
    let (_dir, state) = make_state().await;
    let resp = send(state, "GET", "/", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("/form"));
  }

  #[tokio::test]
  async fn unknown_card_returns_404() {
    let (_dir, state) = make_state().await;
    let resp = send(state, "GET", "/card/Nobody_Here", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn out_of_alphabet_slug_returns_404() {
    let (_dir, state) = make_state().await;
    let resp = send(state, "GET", "/card/a%20b", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Manual submission pipeline ──────────────────────────────────────────────

  #[tokio::test]
  async fn manual_submission_persists_and_redirects() {
    let (_dir, state) = make_state().await;

    let resp = submit_card(
      state.clone(),
      &[
        ("given_name", "José"),
        ("family_name", "Pérez"),
        ("email", "jose@example.com"),
        ("mobile", "+51 999-888-777"),
      ],
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get(header::LOCATION).unwrap();
    assert_eq!(location, "/result/Jose_Perez");

    let slug: Slug = "Jose_Perez".parse().unwrap();
    let record = state.store.load_record(&slug).await.unwrap();
    assert_eq!(record.given_name, "José");
    assert_eq!(record.email, "jose@example.com");
    assert!(!record.has_local_photo);

    // Both artifacts are in place.
    let qr = send(state.clone(), "GET", "/qr/Jose_Perez", None, String::new()).await;
    assert_eq!(qr.status(), StatusCode::OK);
    assert_eq!(
      qr.headers().get(header::CONTENT_TYPE).unwrap(),
      "image/png"
    );

    let result =
      send(state, "GET", "/result/Jose_Perez", None, String::new()).await;
    assert_eq!(result.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn colliding_names_overwrite_the_earlier_record() {
    let (_dir, state) = make_state().await;

    submit_card(
      state.clone(),
      &[
        ("given_name", "José"),
        ("family_name", "Pérez"),
        ("email", "first@example.com"),
      ],
    )
    .await;

    // Different person, same normalized name.
    submit_card(
      state.clone(),
      &[
        ("given_name", "Jose"),
        ("family_name", "Perez"),
        ("email", "second@example.com"),
      ],
    )
    .await;

    let slug: Slug = "Jose_Perez".parse().unwrap();
    let record = state.store.load_record(&slug).await.unwrap();
    assert_eq!(record.email, "second@example.com");
  }

  #[tokio::test]
  async fn blank_name_lands_under_fallback_slug() {
    let (_dir, state) = make_state().await;
    let resp =
      submit_card(state, &[("email", "anon@example.com")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
      resp.headers().get(header::LOCATION).unwrap(),
      "/result/card"
    );
  }

  #[tokio::test]
  async fn uploaded_photo_is_served_and_linked_in_vcard() {
    let (_dir, state) = make_state().await;

    let mut parts = String::new();
    parts.push_str(&text_part("given_name", "José"));
    parts.push_str(&text_part("family_name", "Pérez"));
    parts.push_str(&file_part("photo_file", "me.jpg", "fake-jpeg-bytes"));
    let resp = send(
      state.clone(),
      "POST",
      "/cards",
      Some(&multipart_ct()),
      close_form(parts),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let photo =
      send(state.clone(), "GET", "/photo/Jose_Perez", None, String::new())
        .await;
    assert_eq!(photo.status(), StatusCode::OK);
    assert_eq!(body_string(photo).await, "fake-jpeg-bytes");

    let vcf =
      send(state, "GET", "/vcf/Jose_Perez", None, String::new()).await;
    let body = body_string(vcf).await;
    assert!(
      body.contains("PHOTO;VALUE=URI:http://cards.test/photo/Jose_Perez\r\n"),
      "got:\n{body}"
    );
  }

  // ── vCard download ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn vcf_download_headers_and_content() {
    let (_dir, state) = make_state().await;
    submit_card(
      state.clone(),
      &[
        ("given_name", "José"),
        ("family_name", "Pérez"),
        ("mobile", "+51 999-888-777"),
      ],
    )
    .await;

    let resp =
      send(state, "GET", "/vcf/Jose_Perez", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::CONTENT_TYPE).unwrap(),
      "text/vcard; charset=utf-8"
    );
    assert_eq!(
      resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
      "attachment; filename*=UTF-8''Jos%C3%A9_P%C3%A9rez.vcf"
    );
    assert_eq!(
      resp.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
      "nosniff"
    );

    let body = body_string(resp).await;
    assert!(body.starts_with("BEGIN:VCARD\r\n"));
    assert!(body.contains("TEL;TYPE=CELL,VOICE:+51999888777\r\n"));
    assert!(body.ends_with("END:VCARD\r\n"));
  }

  #[tokio::test]
  async fn vcf_filename_falls_back_to_slug_for_empty_names() {
    let (_dir, state) = make_state().await;

    // Seed a nameless record directly in the store.
    let slug: Slug = "card".parse().unwrap();
    state
      .store
      .save_record(&slug, &Record::default())
      .await
      .unwrap();

    let resp = send(state, "GET", "/vcf/card", None, String::new()).await;
    assert_eq!(
      resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
      "attachment; filename*=UTF-8''card.vcf"
    );
  }

  #[tokio::test]
  async fn vcf_for_unknown_slug_returns_404() {
    let (_dir, state) = make_state().await;
    let resp =
      send(state, "GET", "/vcf/Nobody_Here", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Bulk submission ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn bulk_without_spreadsheet_returns_400() {
    let (_dir, state) = make_state().await;
    let body = close_form(text_part("other", "x"));
    let resp =
      send(state, "POST", "/cards/bulk", Some(&multipart_ct()), body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Static assets ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_logo_returns_404() {
    let (_dir, state) = make_state().await;
    let resp = send(state, "GET", "/logo.png", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn missing_photo_returns_404() {
    let (_dir, state) = make_state().await;
    let resp =
      send(state, "GET", "/photo/Nobody_Here", None, String::new()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
