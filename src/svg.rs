//! SVG backend: a [`Canvas`] that builds an SVG document.
//!
//! Bars become `<rect>` elements and digit groups become `<text>` elements,
//! so output is resolution independent and needs no font files at render
//! time. Saving writes a sibling temporary file and renames it into place.
//!
//! # Example
//!
//! ```
//! use zenbarcode::LayoutConfig;
//! use zenbarcode::svg::render_barcode_svg;
//!
//! let svg = render_barcode_svg("9638507", &LayoutConfig::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains(">9638</text>"));
//! assert!(svg.contains(">5074</text>"));
//! ```

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use crate::config::{CanvasColor, FontStyle, LayoutConfig};
use crate::error::BarcodeError;
use crate::plan::{Rect, Size};
use crate::render::{Canvas, CanvasProvider, FontResolver, Generator, TextAnchor};
use crate::symbology::Ean8;

/// Creates [`SvgCanvas`]es.
#[derive(Copy, Clone, Debug, Default)]
pub struct SvgCanvases;

impl CanvasProvider for SvgCanvases {
    type Canvas = SvgCanvas;

    fn create(&self, size: Size) -> SvgCanvas {
        SvgCanvas::new(size)
    }
}

/// Font handle for SVG output: emitted as CSS font properties.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgFont {
    /// CSS `font-family` value.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// Weight and slant.
    pub style: FontStyle,
}

/// Font resolver for SVG output.
///
/// SVG defers font lookup to the viewer, so by default any family resolves.
/// [`SvgFonts::only`] restricts resolution to known families.
#[derive(Clone, Debug, Default)]
pub struct SvgFonts {
    allowed: Option<Vec<String>>,
}

impl SvgFonts {
    /// Accept any font family.
    pub fn any() -> Self {
        Self::default()
    }

    /// Accept only the given families (ASCII case-insensitive).
    pub fn only<I, T>(families: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            allowed: Some(families.into_iter().map(Into::into).collect()),
        }
    }
}

impl FontResolver for SvgFonts {
    type Font = SvgFont;

    fn resolve(
        &self,
        family: &str,
        size: f32,
        style: FontStyle,
    ) -> Result<SvgFont, BarcodeError> {
        let known = match &self.allowed {
            None => !family.trim().is_empty(),
            Some(list) => list.iter().any(|f| f.eq_ignore_ascii_case(family)),
        };
        if !known {
            return Err(BarcodeError::FontNotFound {
                family: String::from(family),
            });
        }
        Ok(SvgFont {
            family: String::from(family),
            size,
            style,
        })
    }
}

/// In-memory SVG document.
#[derive(Clone, Debug)]
pub struct SvgCanvas {
    size: Size,
    body: String,
}

impl SvgCanvas {
    /// Empty document of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::with_capacity(4096),
        }
    }

    /// Canvas dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The complete SVG document.
    pub fn to_svg(&self) -> String {
        let Size { width, height } = self.size;
        let mut svg = String::with_capacity(self.body.len() + 160);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" shape-rendering="crispEdges">"#
        ));
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn push_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: CanvasColor) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}"{}/>"#,
            fill_attrs(color)
        );
    }
}

impl Canvas for SvgCanvas {
    type Font = SvgFont;

    fn fill(&mut self, color: CanvasColor) {
        let Size { width, height } = self.size;
        self.push_rect(0, 0, width, height, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: CanvasColor) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.push_rect(rect.x, rect.y, rect.width, rect.height, color);
    }

    fn draw_text(&mut self, text: &str, font: &SvgFont, color: CanvasColor, anchor: TextAnchor) {
        let weight = if font.style.is_bold() { "bold" } else { "normal" };
        let slant = if font.style.is_italic() { "italic" } else { "normal" };
        let _ = writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" font-weight="{weight}" font-style="{slant}"{}>{}</text>"#,
            anchor.x,
            anchor.y,
            escape_xml(&font.family),
            font.size,
            fill_attrs(color),
            escape_xml(text)
        );
    }

    fn save(&self, path: &Path) -> Result<(), BarcodeError> {
        write_atomic(path, self.to_svg().as_bytes()).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to save svg");
            BarcodeError::from(e)
        })
    }
}

/// Write `bytes` to a uniquely named hidden sibling of `path`, then rename it
/// into place. The temporary file is removed if any step fails.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("barcode"));
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// `fill` (and `fill-opacity` when translucent) attributes for a color.
fn fill_attrs(color: CanvasColor) -> String {
    match color {
        CanvasColor::Transparent => String::from(r#" fill="none""#),
        CanvasColor::Srgb { r, g, b, a: 255 } => format!(r##" fill="#{r:02x}{g:02x}{b:02x}""##),
        CanvasColor::Srgb { r, g, b, a } => format!(
            r##" fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{:.3}""##,
            a as f32 / 255.0
        ),
    }
}

/// Escape special characters for XML text and attribute content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// EAN‑8 generator with the SVG backend.
pub fn ean8_generator() -> Generator<Ean8, SvgCanvases, SvgFonts> {
    Generator::new(Ean8, SvgCanvases, SvgFonts::any())
}

/// Encode `raw` as EAN‑8 and return the SVG document.
pub fn render_barcode_svg(raw: &str, config: &LayoutConfig) -> Result<String, BarcodeError> {
    ean8_generator().render(raw, config).map(|canvas| canvas.to_svg())
}

/// Encode `raw` as EAN‑8 and save the SVG document to `path`.
pub fn generate_svg(
    raw: &str,
    config: &LayoutConfig,
    path: impl AsRef<Path>,
) -> Result<(), BarcodeError> {
    ean8_generator().generate(raw, config, path)
}
