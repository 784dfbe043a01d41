//! HTML rendering for the browser-facing views.
//!
//! Plain string templates; no templating engine. Every interpolated value
//! goes through [`escape`] unless it is a slug (already `[A-Za-z0-9_]`).

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tarjeta_core::{Record, Slug};
use tarjeta_vcard::normalize_phone;

use crate::bulk::RowOutcome;

/// Minimal HTML entity escaping for text and attribute positions.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

fn shell(title: &str, body: &str) -> String {
  format!(
    r#"<!doctype html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  body {{ font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 40rem; padding: 0 1rem; color: #222; }}
  h1 {{ font-size: 1.4rem; }}
  label {{ display: block; margin-top: .8rem; font-weight: 600; }}
  input[type=text], input[type=email], input[type=url] {{ width: 100%; padding: .4rem; }}
  .actions {{ margin-top: 1.2rem; }}
  .actions a, button {{ display: inline-block; margin-right: .6rem; padding: .5rem .9rem; background: #1a6b3c; color: #fff; border: 0; border-radius: .3rem; text-decoration: none; cursor: pointer; }}
  .photo {{ max-width: 10rem; border-radius: 50%; }}
  .muted {{ color: #777; }}
  table {{ border-collapse: collapse; }}
  td, th {{ border: 1px solid #ccc; padding: .3rem .6rem; }}
</style>
</head>
<body>
<p><a href="/">Inicio</a></p>
{body}
</body>
</html>
"#,
    title = escape(title),
    body = body
  )
}

// ─── Static pages ────────────────────────────────────────────────────────────

pub fn index() -> String {
  shell(
    "Tarjetas digitales",
    r#"<h1>Tarjetas digitales</h1>
<p>Crea tarjetas de contacto con código QR y archivo vCard.</p>
<div class="actions">
  <a href="/form">Crear tarjeta</a>
</div>"#,
  )
}

pub fn form() -> String {
  let manual = r#"<h1>Nueva tarjeta</h1>
<form method="post" action="/cards" enctype="multipart/form-data">
  <label>Nombre <input type="text" name="given_name"></label>
  <label>Apellido <input type="text" name="family_name"></label>
  <label>Cargo <input type="text" name="title"></label>
  <label>Área <input type="text" name="department"></label>
  <label>Correo <input type="email" name="email"></label>
  <label>Celular <input type="text" name="mobile"></label>
  <label>Dirección <input type="text" name="address"></label>
  <label>Web <input type="url" name="website"></label>
  <label>Foto (URL o ruta) <input type="text" name="photo"></label>
  <label>Foto (archivo) <input type="file" name="photo_file"></label>
  <div class="actions"><button type="submit">Crear</button></div>
</form>
<h1>Carga masiva</h1>
<p class="muted">Primera fila: given_name, family_name, title, department, email, mobile, address, website, photo.</p>
<form method="post" action="/cards/bulk" enctype="multipart/form-data">
  <label>Archivo Excel <input type="file" name="xlsx"></label>
  <div class="actions"><button type="submit">Procesar</button></div>
</form>"#;
  shell("Nueva tarjeta", manual)
}

// ─── Record pages ────────────────────────────────────────────────────────────

fn photo_img(record: &Record, slug: &Slug) -> String {
  if record.has_local_photo {
    format!(r#"<p><img class="photo" src="/photo/{slug}" alt=""></p>"#)
  } else {
    String::new()
  }
}

fn field_row(label: &str, value: &str) -> String {
  if value.is_empty() {
    String::new()
  } else {
    format!("<p><strong>{}:</strong> {}</p>", escape(label), escape(value))
  }
}

pub fn card(record: &Record, slug: &Slug) -> String {
  let wa_digits =
    normalize_phone(&record.mobile).trim_start_matches('+').to_string();
  let maps_query =
    utf8_percent_encode(&record.address, NON_ALPHANUMERIC).to_string();

  let mut links = String::new();
  if !record.mobile.is_empty() {
    links.push_str(&format!(
      r#"<a href="tel:{}">Llamar</a>"#,
      escape(&record.mobile)
    ));
    links.push_str(&format!(
      r#"<a href="https://wa.me/{wa_digits}">WhatsApp</a>"#
    ));
  }
  if !record.email.is_empty() {
    links.push_str(&format!(
      r#"<a href="mailto:{}">Correo</a>"#,
      escape(&record.email)
    ));
  }
  if !record.address.is_empty() {
    links.push_str(&format!(
      r#"<a href="https://www.google.com/maps/search/?api=1&amp;query={maps_query}">Mapa</a>"#
    ));
  }

  let body = format!(
    r#"{photo}<h1>{name}</h1>
{title}{department}{email}{mobile}{address}{website}
<div class="actions">{links}</div>
<div class="actions">
  <a href="/vcf/{slug}">Guardar contacto</a>
  <a href="/qr/{slug}">Descargar QR</a>
  <a href="/icard/{slug}">Versión móvil</a>
</div>"#,
    photo = photo_img(record, slug),
    name = escape(&record.full_name()),
    title = field_row("Cargo", &record.title),
    department = field_row("Área", &record.department),
    email = field_row("Correo", &record.email),
    mobile = field_row("Celular", &record.mobile),
    address = field_row("Dirección", &record.address),
    website = field_row("Web", &record.website),
  );
  shell(&record.full_name(), &body)
}

pub fn icard(record: &Record, slug: &Slug) -> String {
  let body = format!(
    r#"{photo}<h1>{name}</h1>
<p class="muted">{title}</p>
<div class="actions">
  <a href="/vcf/{slug}">Agregar a contactos</a>
</div>"#,
    photo = photo_img(record, slug),
    name = escape(&record.full_name()),
    title = escape(&record.title),
  );
  shell(&record.full_name(), &body)
}

pub fn result(record: &Record, slug: &Slug) -> String {
  let body = format!(
    r#"<h1>Tarjeta creada: {name}</h1>
<p><img src="/qr/{slug}" alt="QR"></p>
<div class="actions">
  <a href="/card/{slug}">Ver tarjeta</a>
  <a href="/icard/{slug}">Versión móvil</a>
  <a href="/qr/{slug}">Descargar QR</a>
  <a href="/vcf/{slug}">Descargar vCard</a>
</div>"#,
    name = escape(&record.full_name()),
  );
  shell("Tarjeta creada", &body)
}

// ─── Bulk summary ────────────────────────────────────────────────────────────

pub fn bulk_summary(outcomes: &[RowOutcome]) -> String {
  let created = outcomes
    .iter()
    .filter(|o| matches!(o, RowOutcome::Created { .. }))
    .count();
  let failed = outcomes.len() - created;

  let mut rows = String::new();
  for outcome in outcomes {
    match outcome {
      RowOutcome::Created { row, slug } => rows.push_str(&format!(
        r#"<tr><td>{row}</td><td>creada</td><td><a href="/result/{slug}">{slug}</a></td></tr>"#
      )),
      RowOutcome::Failed { row, reason } => rows.push_str(&format!(
        "<tr><td>{row}</td><td>falló</td><td>{}</td></tr>",
        escape(reason)
      )),
    }
  }

  let body = format!(
    r#"<h1>Carga masiva</h1>
<p>{created} tarjetas creadas, {failed} filas con error.</p>
<table><tr><th>Fila</th><th>Estado</th><th></th></tr>{rows}</table>
<div class="actions"><a href="/form">Volver al formulario</a></div>"#,
  );
  shell("Carga masiva", &body)
}
