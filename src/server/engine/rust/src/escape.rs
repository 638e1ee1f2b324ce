/* src/server/engine/rust/src/escape.rs */

use std::fmt::Write as _;

/// Escape text for HTML element content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Rewrite non-ASCII characters inside JSON strings as `\uXXXX` escapes,
/// using surrogate pairs outside the BMP. Text outside strings is untouched.
pub fn ascii_escape_json(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    match ch {
      '\\' if in_string => {
        out.push(ch);
        if let Some(escaped) = chars.next() {
          out.push(escaped);
        }
      }
      '"' => {
        in_string = !in_string;
        out.push(ch);
      }
      c if in_string && !c.is_ascii() => {
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
          let _ = write!(out, "\\u{unit:04x}");
        }
      }
      c => out.push(c),
    }
  }
  out
}

/// JSON made safe for an inline `<script type="application/json">`:
/// ASCII only, and no `</` that could close the element early.
pub fn script_safe_json(json: &str) -> String {
  ascii_escape_json(json).replace("</", "<\\/")
}
