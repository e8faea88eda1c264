//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use super::color::parse_color;
use super::instructions::Instructions;
use crate::config::FontStyle;

/// Known non-layout keys that should be preserved in `extras` without warnings.
/// Sorted for binary search.
const KNOWN_EXTRAS: &[&str] = &["dpi", "filename", "format", "quality"];

/// Parse an option string into Instructions + warnings.
pub(crate) fn parse_query(query: &str) -> (Instructions, Vec<ParseWarning>) {
    let mut inst = Instructions::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        match canonical_key(&key) {
            Some(canonical) => dispatch_key(canonical, &value, &mut inst, &mut warnings),
            None if KNOWN_EXTRAS.binary_search(&key.as_str()).is_ok() => {
                inst.extras.insert(key, value);
            }
            None => warnings.push(ParseWarning::KeyNotRecognized { key, value }),
        }
    }

    (inst, warnings)
}

/// Map a lowercase key or alias to its canonical name.
fn canonical_key(key: &str) -> Option<&'static str> {
    Some(match key {
        "scale" => "scale",
        "height" | "h" => "height",
        "color" | "fg" | "foreground" => "color",
        "bgcolor" | "bg" | "background" => "bgcolor",
        "font" | "fontfamily" => "font",
        "fontstyle" => "fontstyle",
        _ => return None,
    })
}

fn dispatch_key(
    key: &'static str,
    value: &str,
    inst: &mut Instructions,
    warnings: &mut Vec<ParseWarning>,
) {
    let parsed = match key {
        "scale" => parse_i32(value).map(|v| set_or_warn(&mut inst.scale, v, key, value, warnings)),
        "height" => {
            parse_f32(value).map(|v| set_or_warn(&mut inst.module_height, v, key, value, warnings))
        }
        "color" => {
            parse_color(value).map(|c| set_or_warn(&mut inst.foreground, c, key, value, warnings))
        }
        "bgcolor" => {
            parse_color(value).map(|c| set_or_warn(&mut inst.background, c, key, value, warnings))
        }
        "font" => {
            parse_family(value).map(|f| set_or_warn(&mut inst.font_family, f, key, value, warnings))
        }
        "fontstyle" => parse_font_style(value)
            .map(|s| set_or_warn(&mut inst.font_style, s, key, value, warnings)),
        _ => Some(()),
    };

    if parsed.is_none() {
        warnings.push(ParseWarning::ValueInvalid {
            key,
            value: String::from(value),
            reason: expected(key),
        });
    }
}

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: T,
    key: &'static str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if field.is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            key,
            value: String::from(value),
        });
    }
    *field = Some(parsed);
}

fn expected(key: &str) -> &'static str {
    match key {
        "scale" => "expected an integer",
        "height" => "expected a number",
        "color" | "bgcolor" => "expected hex color or color name",
        "font" => "expected a font family name",
        "fontstyle" => "expected regular|bold|italic|bolditalic",
        _ => "unexpected value",
    }
}

// ---- Value parsers ----

fn parse_i32(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

fn parse_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_family(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| String::from(s))
}

fn parse_font_style(s: &str) -> Option<FontStyle> {
    match s.trim().to_ascii_lowercase().as_str() {
        "regular" | "normal" => Some(FontStyle::Regular),
        "bold" => Some(FontStyle::Bold),
        "italic" => Some(FontStyle::Italic),
        "bolditalic" | "bold-italic" | "bold,italic" => Some(FontStyle::BoldItalic),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Decoded bytes are reassembled as UTF-8; invalid sequences become U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
