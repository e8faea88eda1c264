//! Color parsing: hex (#RGB, #RGBA, #RRGGBB, #RRGGBBAA) and basic named colors.

use crate::CanvasColor;

/// Parse a color string (hex or named) into a `CanvasColor`.
///
/// Hex forms may omit the leading `#`. Names are case-insensitive.
pub(crate) fn parse_color(s: &str) -> Option<CanvasColor> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.eq_ignore_ascii_case("transparent") {
        return Some(CanvasColor::Transparent);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    parse_hex(hex).or_else(|| lookup_named(s))
}

fn parse_hex(hex: &str) -> Option<CanvasColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let d = hex.as_bytes();
    let [r, g, b, a] = match d.len() {
        3 => [nibble(d[0])?, nibble(d[1])?, nibble(d[2])?, 0xff],
        4 => [nibble(d[0])?, nibble(d[1])?, nibble(d[2])?, nibble(d[3])?],
        6 => [byte(&d[0..2])?, byte(&d[2..4])?, byte(&d[4..6])?, 0xff],
        8 => [byte(&d[0..2])?, byte(&d[2..4])?, byte(&d[4..6])?, byte(&d[6..8])?],
        _ => return None,
    };
    Some(CanvasColor::Srgb { r, g, b, a })
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn byte(pair: &[u8]) -> Option<u8> {
    Some(hex_val(pair[0])? << 4 | hex_val(pair[1])?)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn lookup_named(name: &str) -> Option<CanvasColor> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, [r, g, b])| CanvasColor::srgb(r, g, b))
}

/// The sixteen HTML 4 color keywords plus the common grey spellings.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aqua", [0, 255, 255]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("lime", [0, 255, 0]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("silver", [192, 192, 192]),
    ("teal", [0, 128, 128]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("#f00"), Some(CanvasColor::srgb(255, 0, 0)));
        assert_eq!(parse_color("0f08"), Some(CanvasColor::Srgb { r: 0, g: 255, b: 0, a: 0x88 }));
        assert_eq!(parse_color("#1a2B3c"), Some(CanvasColor::srgb(0x1a, 0x2b, 0x3c)));
        assert_eq!(
            parse_color("#00000080"),
            Some(CanvasColor::Srgb { r: 0, g: 0, b: 0, a: 0x80 })
        );
    }

    #[test]
    fn named() {
        assert_eq!(parse_color("White"), Some(CanvasColor::white()));
        assert_eq!(parse_color(" NAVY "), Some(CanvasColor::srgb(0, 0, 128)));
        assert_eq!(parse_color("transparent"), Some(CanvasColor::Transparent));
    }

    #[test]
    fn invalid() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#ggg"), None);
    }
}
