//! Bulk spreadsheet intake.
//!
//! The first row names the recognized columns (matched
//! case-insensitively); unrecognized columns are ignored and missing ones
//! default to empty. Every following row becomes one record, fed through
//! the same pipeline as a manual submission.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError};
use tarjeta_core::{Record, Slug};

/// Header names the intake recognizes.
pub const RECOGNIZED_COLUMNS: [&str; 9] = [
  "given_name",
  "family_name",
  "title",
  "department",
  "email",
  "mobile",
  "address",
  "website",
  "photo",
];

/// Per-row result of a bulk run, reported back in the summary page so
/// failed rows are not silently dropped.
#[derive(Debug)]
pub enum RowOutcome {
  /// 1-based spreadsheet row number and the slug the record landed under.
  Created { row: usize, slug: Slug },
  Failed { row: usize, reason: String },
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct ColumnMap {
  given_name:  Option<usize>,
  family_name: Option<usize>,
  title:       Option<usize>,
  department:  Option<usize>,
  email:       Option<usize>,
  mobile:      Option<usize>,
  address:     Option<usize>,
  website:     Option<usize>,
  photo:       Option<usize>,
}

fn map_header(header: &[String]) -> ColumnMap {
  let idx = |name: &str| header.iter().position(|h| h == name);
  ColumnMap {
    given_name:  idx("given_name"),
    family_name: idx("family_name"),
    title:       idx("title"),
    department:  idx("department"),
    email:       idx("email"),
    mobile:      idx("mobile"),
    address:     idx("address"),
    website:     idx("website"),
    photo:       idx("photo"),
  }
}

fn cell_to_string(cell: &Data) -> String {
  match cell {
    Data::Empty => String::new(),
    Data::String(s) => s.clone(),
    Data::Int(i) => i.to_string(),
    // Phone numbers and postal codes come back as floats; render whole
    // values without the trailing ".0".
    Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
    Data::Float(f) => f.to_string(),
    Data::Bool(b) => b.to_string(),
    Data::DateTime(dt) => dt.as_f64().to_string(),
    Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    Data::Error(_) => String::new(),
  }
}

fn row_to_record(cols: &ColumnMap, row: &[Data]) -> Record {
  let get = |idx: Option<usize>| {
    idx
      .and_then(|i| row.get(i))
      .map(cell_to_string)
      .unwrap_or_default()
      .trim()
      .to_string()
  };

  Record {
    given_name:  get(cols.given_name),
    family_name: get(cols.family_name),
    title:       get(cols.title),
    department:  get(cols.department),
    email:       get(cols.email),
    mobile:      get(cols.mobile),
    address:     get(cols.address),
    website:     get(cols.website),
    photo:       get(cols.photo),
    has_local_photo: false,
  }
}

fn is_blank(record: &Record) -> bool {
  record.given_name.is_empty()
    && record.family_name.is_empty()
    && record.title.is_empty()
    && record.department.is_empty()
    && record.email.is_empty()
    && record.mobile.is_empty()
    && record.address.is_empty()
    && record.website.is_empty()
    && record.photo.is_empty()
}

/// Parse the first worksheet of an xlsx file into `(row_number, Record)`
/// pairs. Row numbers are the spreadsheet's own 1-based numbering.
/// Trailing/interior rows with no recognized content are skipped.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Vec<(usize, Record)>, XlsxError> {
  let mut workbook = Xlsx::new(Cursor::new(bytes))?;
  let Some(range) = workbook.worksheet_range_at(0) else {
    return Ok(Vec::new());
  };
  let range = range?;

  let mut rows = range.rows();
  let Some(header_row) = rows.next() else {
    return Ok(Vec::new());
  };
  let header: Vec<String> = header_row
    .iter()
    .map(|c| cell_to_string(c).trim().to_ascii_lowercase())
    .collect();
  let cols = map_header(&header);

  let mut records = Vec::new();
  for (i, row) in rows.enumerate() {
    let record = row_to_record(&cols, row);
    if is_blank(&record) {
      continue;
    }
    // Header is row 1, first data row is row 2.
    records.push((i + 2, record));
  }
  Ok(records)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
