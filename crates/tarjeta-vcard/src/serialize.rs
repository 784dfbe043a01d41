//! vCard 3.0 serializer.
//!
//! Produces CRLF line endings and folds at 75 octets per RFC 2425 §5.8.1.

use tarjeta_core::Record;

use crate::phone::normalize_phone;

// ─── Line folding ────────────────────────────────────────────────────────────

/// Emit `s` as one logical line, folding at 75 octets with CRLF + SP
/// continuation.
fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{}\r\n", s);
  }

  let mut result = String::new();
  let total = s.len();
  let mut pos = 0usize;
  let mut first = true;

  while pos < total {
    let limit = if first { 75 } else { 74 };
    let end = if pos + limit >= total {
      total
    } else {
      // Walk back to the nearest valid UTF-8 char boundary
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      // Guarantee at least one byte per segment
      if e == pos { pos + 1 } else { e }
    };

    if !first {
      result.push(' ');
    }
    result.push_str(&s[pos..end]);
    result.push_str("\r\n");
    pos = end;
    first = false;
  }

  result
}

// ─── Value escaping ──────────────────────────────────────────────────────────

/// Escape a full property value: `\`, `,`, `;`, `\n`.
fn escape_value(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace(',', "\\,")
    .replace(';', "\\;")
    .replace('\n', "\\n")
}

/// Escape a semicolon-delimited component (N / ORG / ADR field): `\`,
/// `;`, `\n`. Commas are list-separators within a component and are not
/// escaped here.
fn escape_component(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace(';', "\\;")
    .replace('\n', "\\n")
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Compose the full vCard in the fixed property order. Optional lines are
/// omitted entirely when their field is empty.
pub(crate) fn serialize(
  record: &Record,
  hosted_photo_url: Option<&str>,
  org_name: &str,
) -> String {
  let mut out = String::new();
  out.push_str("BEGIN:VCARD\r\n");
  out.push_str("VERSION:3.0\r\n");

  // N and FN are mandatory in 3.0; emitted even when both parts are empty.
  out.push_str(&fold_line(&format!(
    "N:{};{};;;",
    escape_component(&record.family_name),
    escape_component(&record.given_name)
  )));
  out.push_str(&fold_line(&format!(
    "FN:{}",
    escape_value(&record.full_name())
  )));

  if !org_name.is_empty() || !record.department.is_empty() {
    out.push_str(&fold_line(&format!(
      "ORG:{};{}",
      escape_component(org_name),
      escape_component(&record.department)
    )));
  }

  if !record.title.is_empty() {
    out.push_str(&fold_line(&format!(
      "TITLE:{}",
      escape_value(&record.title)
    )));
  }

  let tel = normalize_phone(&record.mobile);
  if !tel.is_empty() {
    out.push_str(&fold_line(&format!("TEL;TYPE=CELL,VOICE:{}", tel)));
  }

  if !record.email.is_empty() {
    out.push_str(&fold_line(&format!(
      "EMAIL;TYPE=INTERNET,PREF:{}",
      record.email
    )));
  }

  if !record.address.is_empty() {
    // Only the street sub-field is populated; PO box, locality, region,
    // postal code and country stay empty.
    out.push_str(&fold_line(&format!(
      "ADR;TYPE=WORK:;;{};;;;",
      escape_component(&record.address)
    )));
  }

  if !record.website.is_empty() {
    out.push_str(&fold_line(&format!("URL:{}", record.website)));
  }

  if let Some(uri) = hosted_photo_url {
    out.push_str(&fold_line(&format!("PHOTO;VALUE=URI:{}", uri)));
  } else if !record.photo.is_empty() {
    out.push_str(&fold_line(&format!("PHOTO;VALUE=URI:{}", record.photo)));
  }

  out.push_str("END:VCARD\r\n");
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
