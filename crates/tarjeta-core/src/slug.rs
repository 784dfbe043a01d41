//! Slug derivation — the record-identity subsystem.
//!
//! A slug is the sole key under which a record and all of its derived
//! artifacts (photo, QR image, vCard) are addressed. Two names that
//! normalize to the same slug silently overwrite each other; collision
//! handling is intentionally out of scope.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::error::{Error, Result};

/// Identifier substituted when a name normalizes to the empty string.
pub const FALLBACK_SLUG: &str = "card";

// ─── Normalization pipeline ──────────────────────────────────────────────────

/// Normalize `s` into the slug alphabet `[A-Za-z0-9_]`.
///
/// NFKD-decomposes, drops combining marks (so "José" → "Jose"), replaces
/// every maximal run of other characters with a single `_`, and trims
/// leading/trailing underscores. May return the empty string.
pub fn slugify(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut pending_sep = false;

  for c in s.trim().nfkd() {
    if is_combining_mark(c) {
      continue;
    }
    if c.is_ascii_alphanumeric() {
      if pending_sep && !out.is_empty() {
        out.push('_');
      }
      pending_sep = false;
      out.push(c);
    } else {
      pending_sep = true;
    }
  }

  out
}

// ─── Slug type ───────────────────────────────────────────────────────────────

/// A validated record identifier: non-empty, `[A-Za-z0-9_]` only.
///
/// Parsing rejects anything outside the alphabet, so a slug taken from a
/// URL path can never escape the storage directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
  /// Derive the slug for a person, applying [`FALLBACK_SLUG`] when the
  /// joined name normalizes to nothing.
  pub fn for_name(given: &str, family: &str) -> Slug {
    let s = slugify(&format!("{given}_{family}"));
    if s.is_empty() {
      Slug(FALLBACK_SLUG.to_string())
    } else {
      Slug(s)
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl FromStr for Slug {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if !s.is_empty()
      && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
      Ok(Slug(s.to_string()))
    } else {
      Err(Error::InvalidSlug(s.to_string()))
    }
  }
}

impl TryFrom<String> for Slug {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    s.parse()
  }
}

impl From<Slug> for String {
  fn from(slug: Slug) -> String {
    slug.0
  }
}

impl fmt::Display for Slug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn diacritics_are_stripped() {
    assert_eq!(slugify("José"), "Jose");
    assert_eq!(slugify("Pérez Ñañez"), "Perez_Nanez");
    assert_eq!(slugify("Müller"), "Muller");
  }

  #[test]
  fn joined_name_produces_single_separator() {
    assert_eq!(Slug::for_name("José", "Pérez").as_str(), "Jose_Perez");
  }

  #[test]
  fn punctuation_runs_collapse_to_one_underscore() {
    assert_eq!(slugify("a - b .. c"), "a_b_c");
    assert_eq!(slugify("  O'Brien, Jr.  "), "O_Brien_Jr");
  }

  #[test]
  fn no_leading_trailing_or_doubled_underscores() {
    for input in ["--x--", "_x_", "a!!!b", "¡Hola!", "a__b", "ñ.ñ"] {
      let s = slugify(input);
      assert!(!s.starts_with('_'), "leading _ in {s:?}");
      assert!(!s.ends_with('_'), "trailing _ in {s:?}");
      assert!(!s.contains("__"), "doubled _ in {s:?}");
      assert!(
        s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'),
        "bad byte in {s:?}"
      );
    }
  }

  #[test]
  fn empty_and_symbol_only_names_yield_empty_string() {
    assert_eq!(slugify(""), "");
    assert_eq!(slugify("   "), "");
    assert_eq!(slugify("!!!"), "");
  }

  #[test]
  fn for_name_substitutes_fallback() {
    assert_eq!(Slug::for_name("", "").as_str(), FALLBACK_SLUG);
    assert_eq!(Slug::for_name("¡¡", "!!").as_str(), FALLBACK_SLUG);
  }

  #[test]
  fn parse_rejects_out_of_alphabet_input() {
    assert!("Jose_Perez".parse::<Slug>().is_ok());
    assert!("".parse::<Slug>().is_err());
    assert!("../etc/passwd".parse::<Slug>().is_err());
    assert!("a b".parse::<Slug>().is_err());
  }
}
