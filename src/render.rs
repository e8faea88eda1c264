//! Rendering boundary: drawing-surface traits and the end-to-end generator.
//!
//! The core never touches pixels. A backend supplies a [`CanvasProvider`]
//! (creates drawing surfaces) and a [`FontResolver`] (turns a family name
//! into a font handle the canvas understands). [`render`] executes a
//! [`DrawPlan`] against them; [`Generator`] sequences encode → layout →
//! render → save.
//!
//! Canvases are owned values. Whatever happens during drawing or saving,
//! the canvas is dropped when the call returns.

use std::path::Path;

use crate::config::{CanvasColor, FontStyle, LayoutConfig};
use crate::error::BarcodeError;
use crate::plan::{DrawPlan, Rect, Size};
use crate::symbology::{Encoded, Symbology};

/// Where a text run starts: left edge and baseline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextAnchor {
    /// Left edge of the run.
    pub x: f32,
    /// Baseline.
    pub y: f32,
}

/// A mutable drawing surface.
pub trait Canvas {
    /// Font handle produced by the matching [`FontResolver`].
    type Font;

    /// Fill the whole surface.
    fn fill(&mut self, color: CanvasColor);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: CanvasColor);

    /// Draw a text run starting at `anchor`.
    fn draw_text(
        &mut self,
        text: &str,
        font: &Self::Font,
        color: CanvasColor,
        anchor: TextAnchor,
    );

    /// Persist the surface to `path`.
    ///
    /// Implementations must not leave a partially written file at `path`.
    fn save(&self, path: &Path) -> Result<(), BarcodeError>;
}

/// Creates drawing surfaces.
pub trait CanvasProvider {
    type Canvas: Canvas;

    /// A fresh surface of the given size.
    fn create(&self, size: Size) -> Self::Canvas;
}

/// Resolves font descriptors to backend font handles.
pub trait FontResolver {
    type Font;

    /// Font for `family` at `size` pixels. Fails with
    /// [`BarcodeError::FontNotFound`] when the family is unavailable.
    fn resolve(
        &self,
        family: &str,
        size: f32,
        style: FontStyle,
    ) -> Result<Self::Font, BarcodeError>;
}

/// Draw a plan onto a new canvas.
///
/// The font is resolved before the canvas is created, so a missing font
/// never allocates a surface.
pub fn render<P, F>(
    plan: &DrawPlan,
    config: &LayoutConfig,
    canvases: &P,
    fonts: &F,
) -> Result<P::Canvas, BarcodeError>
where
    P: CanvasProvider,
    F: FontResolver<Font = <P::Canvas as Canvas>::Font>,
{
    let font_size = plan.texts[0].font_size;
    let font = fonts.resolve(&config.font.family, font_size, config.font.style)?;

    let mut canvas = canvases.create(plan.canvas);
    canvas.fill(config.background);
    for bar in &plan.bars {
        canvas.fill_rect(bar.rect, config.foreground);
    }
    for text in &plan.texts {
        canvas.draw_text(
            &text.text,
            &font,
            config.foreground,
            TextAnchor {
                x: text.x,
                y: text.y,
            },
        );
    }
    Ok(canvas)
}

/// End-to-end barcode generation for one symbology and one backend.
///
/// Holds no per-request state; a single generator can serve any number of
/// calls, including concurrent ones when the backend allows it.
#[derive(Clone, Debug, Default)]
pub struct Generator<S, P, F> {
    symbology: S,
    canvases: P,
    fonts: F,
}

impl<S, P, F> Generator<S, P, F>
where
    S: Symbology,
    P: CanvasProvider,
    F: FontResolver<Font = <P::Canvas as Canvas>::Font>,
{
    /// Create a generator.
    pub fn new(symbology: S, canvases: P, fonts: F) -> Self {
        Self {
            symbology,
            canvases,
            fonts,
        }
    }

    /// The symbology this generator encodes.
    pub fn symbology(&self) -> &S {
        &self.symbology
    }

    /// Encode and lay out without drawing.
    pub fn plan(
        &self,
        raw: &str,
        config: &LayoutConfig,
    ) -> Result<(Encoded, DrawPlan), BarcodeError> {
        let encoded = self.symbology.encode(raw)?;
        let plan = encoded.layout(config)?;
        Ok((encoded, plan))
    }

    /// Encode, lay out and draw onto a new canvas.
    pub fn render(&self, raw: &str, config: &LayoutConfig) -> Result<P::Canvas, BarcodeError> {
        let (_, plan) = self.plan(raw, config)?;
        render(&plan, config, &self.canvases, &self.fonts)
    }

    /// Encode, lay out, draw and save to `path`.
    pub fn generate(
        &self,
        raw: &str,
        config: &LayoutConfig,
        path: impl AsRef<Path>,
    ) -> Result<(), BarcodeError> {
        let path = path.as_ref();
        let (encoded, plan) = self.plan(raw, config)?;
        let canvas = render(&plan, config, &self.canvases, &self.fonts)?;
        canvas.save(path)?;
        tracing::debug!(
            symbology = self.symbology.name(),
            digits = encoded.digits.as_str(),
            width = plan.canvas.width,
            height = plan.canvas.height,
            path = %path.display(),
            "saved barcode"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, InputError};
    use crate::symbology::Ean8;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Fill(CanvasColor),
        Rect(Rect),
        Text(String, String),
    }

    #[derive(Default)]
    struct Recorder {
        created: Rc<RefCell<Vec<Size>>>,
    }

    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        type Font = String;

        fn fill(&mut self, color: CanvasColor) {
            self.ops.push(Op::Fill(color));
        }

        fn fill_rect(&mut self, rect: Rect, _color: CanvasColor) {
            self.ops.push(Op::Rect(rect));
        }

        fn draw_text(
            &mut self,
            text: &str,
            font: &String,
            _color: CanvasColor,
            _anchor: TextAnchor,
        ) {
            self.ops.push(Op::Text(text.to_string(), font.clone()));
        }

        fn save(&self, _path: &Path) -> Result<(), BarcodeError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    impl CanvasProvider for Recorder {
        type Canvas = RecordingCanvas;

        fn create(&self, size: Size) -> RecordingCanvas {
            self.created.borrow_mut().push(size);
            RecordingCanvas { ops: Vec::new() }
        }
    }

    struct Fonts(&'static [&'static str]);

    impl FontResolver for Fonts {
        type Font = String;

        fn resolve(
            &self,
            family: &str,
            size: f32,
            _style: FontStyle,
        ) -> Result<String, BarcodeError> {
            if self.0.iter().any(|f| *f == family) {
                Ok(format!("{family}@{size}"))
            } else {
                Err(BarcodeError::FontNotFound {
                    family: family.to_string(),
                })
            }
        }
    }

    fn generator() -> Generator<Ean8, Recorder, Fonts> {
        Generator::new(Ean8, Recorder::default(), Fonts(&["Arial"]))
    }

    #[test]
    fn render_draws_background_bars_and_text() {
        let generator = generator();
        let config = LayoutConfig::default().scale(2);
        let (_, plan) = generator.plan("123456", &config).unwrap();
        let canvas = generator.render("123456", &config).unwrap();

        assert_eq!(canvas.ops[0], Op::Fill(CanvasColor::white()));
        let rects: Vec<Rect> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect(r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(rects, plan.bars.iter().map(|b| b.rect).collect::<Vec<_>>());

        let n = canvas.ops.len();
        assert_eq!(
            canvas.ops[n - 2..],
            [
                Op::Text("0123".into(), format!("Arial@{}", 2.0f32 * 7.8)),
                Op::Text("4565".into(), format!("Arial@{}", 2.0f32 * 7.8)),
            ]
        );
        assert_eq!(*generator.canvases.created.borrow(), vec![plan.canvas]);
    }

    #[test]
    fn missing_font_creates_no_canvas() {
        let generator = generator();
        let config = LayoutConfig::default().font("Nope", FontStyle::Regular);
        let err = generator.render("1", &config).err().unwrap();
        assert!(matches!(err, BarcodeError::FontNotFound { ref family } if family == "Nope"));
        assert!(generator.canvases.created.borrow().is_empty());
    }

    #[test]
    fn input_errors_stop_before_layout() {
        let generator = generator();
        let err = generator
            .generate("123456789", &LayoutConfig::default(), "unused.svg")
            .unwrap_err();
        assert_eq!(err.input_error(), Some(InputError::TooLong { len: 9, max: 8 }));
        assert!(generator.canvases.created.borrow().is_empty());
    }

    #[test]
    fn config_errors_stop_before_render() {
        let generator = generator();
        let config = LayoutConfig::default().module_height(0.0);
        let err = generator.generate("1", &config, "unused.svg").unwrap_err();
        assert_eq!(err.config_error(), Some(ConfigError::NonPositiveModuleHeight));
        assert!(generator.canvases.created.borrow().is_empty());
    }

    #[test]
    fn save_errors_propagate_unchanged() {
        let err = generator()
            .generate("1", &LayoutConfig::default(), "unused.svg")
            .unwrap_err();
        match err {
            BarcodeError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
