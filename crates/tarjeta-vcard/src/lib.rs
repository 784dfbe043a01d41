//! vCard 3.0 builder for tarjeta.
//!
//! Composes a contact-interchange document from a [`tarjeta_core::Record`].
//! Pure synchronous; no HTTP or filesystem dependencies.
//!
//! # Quick start
//!
//! ```
//! use tarjeta_core::Record;
//!
//! let record = Record {
//!   given_name:  "José".to_string(),
//!   family_name: "Pérez".to_string(),
//!   ..Record::default()
//! };
//! let card = tarjeta_vcard::vcard(&record, None, "Acme");
//! assert!(card.starts_with("BEGIN:VCARD\r\n"));
//! ```

mod phone;
mod serialize;

pub use phone::normalize_phone;
use tarjeta_core::Record;

/// Build the vCard 3.0 text for `record`.
///
/// `hosted_photo_url` is the absolute URL of this service's own
/// photo-serving endpoint for the record's slug, when a locally stored
/// photo exists; pass `None` when there is none (or when constructing
/// the URL failed — the photo line is simply omitted, never an error).
/// When `None` and the record carries a raw remote photo reference, that
/// reference is emitted verbatim instead. At most one photo line.
///
/// Every line is terminated with CRLF, as the format mandates.
pub fn vcard(
  record: &Record,
  hosted_photo_url: Option<&str>,
  org_name: &str,
) -> String {
  serialize::serialize(record, hosted_photo_url, org_name)
}
