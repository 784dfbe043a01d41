//! The [`Record`] — one person's card data.

use serde::{Deserialize, Serialize};

use crate::slug::Slug;

/// The flat field mapping persisted per slug.
///
/// All fields are free-form strings; empty means "not provided". The one
/// derived field is `has_local_photo`, set when a photo was materialized
/// under this record's slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  #[serde(default)]
  pub given_name:  String,
  #[serde(default)]
  pub family_name: String,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub department:  String,
  #[serde(default)]
  pub email:       String,
  #[serde(default)]
  pub mobile:      String,
  #[serde(default)]
  pub address:     String,
  #[serde(default)]
  pub website:     String,
  /// Photo reference as submitted: a remote URL or a local absolute path.
  #[serde(default)]
  pub photo:       String,
  #[serde(default)]
  pub has_local_photo: bool,
}

impl Record {
  /// The identifier this record (and all its artifacts) is keyed under.
  pub fn slug(&self) -> Slug {
    Slug::for_name(&self.given_name, &self.family_name)
  }

  /// `"<given> <family>"`, as used for the vCard `FN` line.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.given_name, self.family_name)
  }

  /// Trim every field in place. Submission handlers call this once so the
  /// stored record never carries stray whitespace.
  pub fn trim(&mut self) {
    for field in [
      &mut self.given_name,
      &mut self.family_name,
      &mut self.title,
      &mut self.department,
      &mut self.email,
      &mut self.mobile,
      &mut self.address,
      &mut self.website,
      &mut self.photo,
    ] {
      *field = field.trim().to_string();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn json_round_trip_preserves_every_field() {
    let record = Record {
      given_name:  "José".to_string(),
      family_name: "Pérez".to_string(),
      title:       "Ingeniero".to_string(),
      department:  "Medio Ambiente".to_string(),
      email:       "jose.perez@example.com".to_string(),
      mobile:      "+51 999 888 777".to_string(),
      address:     "Av. Principal 123, Lima".to_string(),
      website:     "https://example.com".to_string(),
      photo:       "https://example.com/jose.jpg".to_string(),
      has_local_photo: true,
    };

    let json = serde_json::to_string_pretty(&record).unwrap();
    let back: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
  }

  #[test]
  fn missing_fields_default_to_empty() {
    let back: Record = serde_json::from_str(r#"{"given_name":"Ana"}"#).unwrap();
    assert_eq!(back.given_name, "Ana");
    assert_eq!(back.family_name, "");
    assert!(!back.has_local_photo);
  }

  #[test]
  fn trim_strips_stray_whitespace() {
    let mut record = Record {
      given_name: "  Ana ".to_string(),
      mobile: " +51 1 ".to_string(),
      ..Record::default()
    };
    record.trim();
    assert_eq!(record.given_name, "Ana");
    assert_eq!(record.mobile, "+51 1");
  }

  #[test]
  fn slug_comes_from_both_name_parts() {
    let record = Record {
      given_name:  "José".to_string(),
      family_name: "Pérez".to_string(),
      ..Record::default()
    };
    assert_eq!(record.slug().as_str(), "Jose_Perez");
  }
}
