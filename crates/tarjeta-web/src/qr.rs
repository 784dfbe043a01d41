//! QR rendering — encodes a card URL into a PNG image.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::QrCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
  #[error("qr encoding error: {0}")]
  Encode(#[from] qrcode::types::QrError),

  #[error("png encoding error: {0}")]
  Png(#[from] image::ImageError),
}

/// Encode `url` as a standard QR symbol and render it to PNG bytes.
pub fn qr_png(url: &str) -> Result<Vec<u8>, QrError> {
  let code = QrCode::new(url.as_bytes())?;
  let img = code.render::<Luma<u8>>().build();

  let mut png = Vec::new();
  img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
  Ok(png)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_a_png() {
    let bytes = qr_png("https://cards.example.com/icard/Jose_Perez").unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "not a PNG header");
  }

  #[test]
  fn distinct_urls_render_distinct_symbols() {
    let a = qr_png("https://cards.example.com/icard/a").unwrap();
    let b = qr_png("https://cards.example.com/icard/b").unwrap();
    assert_ne!(a, b);
  }
}
