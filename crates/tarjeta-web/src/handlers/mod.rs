//! Route handlers, grouped by concern.

pub mod create;
pub mod download;
pub mod views;

use tarjeta_core::Slug;

use crate::error::Error;

/// Parse a path segment as a slug. Out-of-alphabet input gets the same
/// not-found response as an unknown record.
pub(crate) fn parse_slug(s: &str) -> Result<Slug, Error> {
  s.parse().map_err(|_| Error::NotFound)
}
