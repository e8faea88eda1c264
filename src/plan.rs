//! Draw-plan layout: module sequence + config → bar rectangles and text anchors.
//!
//! Pure geometry. The plan says exactly what to draw and where; a
//! [`Canvas`](crate::render::Canvas) implementation does the drawing.
//!
//! # Example
//!
//! ```
//! use zenbarcode::{Ean8, LayoutConfig, Size, Symbology, layout};
//!
//! let encoded = Ean8.encode("9638507").unwrap();
//! let plan = layout(&encoded.modules, &encoded.digits, &LayoutConfig::default()).unwrap();
//!
//! // 67 modules × 5px + 10px margins on each side, 30 modules tall × 5px
//! assert_eq!(plan.canvas, Size::new(355, 150));
//! assert_eq!(plan.texts[0].text, "9638");
//! assert_eq!(plan.texts[1].text, "5074");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use num_traits::Float;

use crate::config::LayoutConfig;
use crate::error::BarcodeError;
use crate::symbology::{Digits, Encoded, ModuleKind, ModuleSequence};

/// Margin on every side, in modules.
const MARGIN_MODULES: u32 = 2;
/// How far data bars stop short of the canvas bottom, in modules.
const DATA_BAR_CLEARANCE: f32 = 10.0;
/// Text baseline offset above the guard bar bottom, in modules.
const TEXT_RISE: f32 = 3.0;
/// Divisor placing the right digit group under the right half.
const RIGHT_TEXT_DIVISOR: f32 = 1.65;
/// Font size per unit of scale.
const FONT_SIZE_PER_SCALE: f32 = 7.8;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clip to `(0, 0, bounds.width, bounds.height)`. May produce an empty rect.
    pub fn clip_to(self, bounds: Size) -> Self {
        let x = self.x.min(bounds.width);
        let y = self.y.min(bounds.height);
        Self {
            x,
            y,
            width: self.width.min(bounds.width - x),
            height: self.height.min(bounds.height - y),
        }
    }

    /// Right edge (exclusive).
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// One filled bar of the symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bar {
    /// Area to fill with the foreground color.
    pub rect: Rect,
    /// Guard bars are taller than data bars.
    pub kind: ModuleKind,
}

/// A run of human-readable digits and where to draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPlacement {
    /// Digits to draw.
    pub text: String,
    /// Left edge of the run.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    /// Font size in pixels.
    pub font_size: f32,
}

/// Everything a renderer needs to draw one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawPlan {
    /// Canvas dimensions.
    pub canvas: Size,
    /// Resolved pixels per module.
    pub scale: u32,
    /// Bars, left to right.
    pub bars: Vec<Bar>,
    /// Left and right digit groups.
    pub texts: [TextPlacement; 2],
}

impl DrawPlan {
    /// Bars belonging to guard patterns.
    pub fn guard_bars(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(|b| b.kind == ModuleKind::Guard)
    }
}

/// Compute the draw plan for an encoded symbol.
///
/// Fails only when `config` does not [validate](LayoutConfig::validate).
pub fn layout(
    modules: &ModuleSequence,
    digits: &Digits,
    config: &LayoutConfig,
) -> Result<DrawPlan, BarcodeError> {
    config.validate()?;

    let scale = config.effective_scale();
    let scale_f = scale as f32;
    let margin = MARGIN_MODULES.saturating_mul(scale);
    let margin_f = margin as f32;

    let symbol_width = scale.saturating_mul(modules.len() as u32);
    let total_height = scale_f * config.module_height;
    let canvas = Size::new(
        symbol_width.saturating_add(margin.saturating_mul(2)),
        total_height as u32,
    );

    let data_height = Float::floor(total_height - scale_f * DATA_BAR_CLEARANCE);
    let guard_height = Float::floor(total_height - margin_f);

    let mut bars = Vec::with_capacity(modules.len());
    let mut x = margin;
    for module in modules {
        if module.bar {
            let bottom = match module.kind {
                ModuleKind::Data => data_height,
                ModuleKind::Guard => guard_height,
            };
            let height = bottom - margin_f + 1.0;
            let height = if height > 0.0 { height as u32 } else { 0 };
            bars.push(Bar {
                rect: Rect::new(x, margin, scale, height).clip_to(canvas),
                kind: module.kind,
            });
        }
        x = x.saturating_add(scale);
    }

    let (left, right) = digits.halves();
    let baseline = guard_height - scale_f * TEXT_RISE;
    let font_size = scale_f * FONT_SIZE_PER_SCALE;
    let texts = [
        TextPlacement {
            text: String::from(left),
            x: margin_f + scale_f * digits.len() as f32,
            y: baseline,
            font_size,
        },
        TextPlacement {
            text: String::from(right),
            x: margin_f + symbol_width as f32 / RIGHT_TEXT_DIVISOR,
            y: baseline,
            font_size,
        },
    ];

    tracing::trace!(
        width = canvas.width,
        height = canvas.height,
        bars = bars.len(),
        "laid out barcode"
    );

    Ok(DrawPlan {
        canvas,
        scale,
        bars,
        texts,
    })
}

impl Encoded {
    /// Lay out this symbol. See [`layout()`].
    pub fn layout(&self, config: &LayoutConfig) -> Result<DrawPlan, BarcodeError> {
        layout(&self.modules, &self.digits, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::symbology::{Ean8, Symbology};

    fn plan(raw: &str, config: &LayoutConfig) -> DrawPlan {
        Ean8.encode(raw).unwrap().layout(config).unwrap()
    }

    #[test]
    fn default_geometry() {
        let p = plan("123456", &LayoutConfig::default());
        assert_eq!(p.scale, 5);
        assert_eq!(p.canvas, Size::new(5 * 67 + 20, 150));

        // Start guard: bar at module 0, bar at module 2.
        assert_eq!(p.bars[0].rect, Rect::new(10, 10, 5, 131));
        assert_eq!(p.bars[0].kind, ModuleKind::Guard);
        assert_eq!(p.bars[1].rect, Rect::new(20, 10, 5, 131));

        // First data bar: left code for '0' is 0001101, so module 6.
        assert_eq!(p.bars[2].rect, Rect::new(10 + 5 * 6, 10, 5, 91));
        assert_eq!(p.bars[2].kind, ModuleKind::Data);
    }

    #[test]
    fn one_bar_per_bar_module() {
        let enc = Ean8.encode("96385074").unwrap();
        let p = enc.layout(&LayoutConfig::default()).unwrap();
        let expected = enc.modules.bits().chars().filter(|&c| c == '1').count();
        assert_eq!(p.bars.len(), expected);
        assert_eq!(p.guard_bars().count(), 6);
    }

    #[test]
    fn bars_advance_by_scale_per_module() {
        let enc = Ean8.encode("0000000").unwrap();
        let config = LayoutConfig::default().scale(3);
        let p = enc.layout(&config).unwrap();
        let positions: Vec<u32> = enc
            .modules
            .iter()
            .enumerate()
            .filter(|(_, m)| m.bar)
            .map(|(i, _)| 6 + 3 * i as u32)
            .collect();
        let xs: Vec<u32> = p.bars.iter().map(|b| b.rect.x).collect();
        assert_eq!(xs, positions);
        assert!(p.bars.iter().all(|b| b.rect.width == 3));
    }

    #[test]
    fn text_anchors() {
        let p = plan("123456", &LayoutConfig::default());
        assert_eq!(p.texts[0].text, "0123");
        assert_eq!(p.texts[1].text, "4565");
        assert_eq!(p.texts[0].x, 10.0 + 5.0 * 8.0);
        assert_eq!(p.texts[0].y, 140.0 - 15.0);
        assert_eq!(p.texts[1].x, 10.0 + 335.0 / 1.65);
        assert_eq!(p.texts[1].y, p.texts[0].y);
        assert_eq!(p.texts[0].font_size, 5.0 * 7.8);
    }

    #[test]
    fn deterministic() {
        let enc = Ean8.encode("5512345").unwrap();
        let config = LayoutConfig::default().scale(4).module_height(25.5);
        assert_eq!(enc.layout(&config).unwrap(), enc.layout(&config).unwrap());
    }

    #[test]
    fn scale_floor_gives_same_width() {
        let enc = Ean8.encode("123").unwrap();
        let zero = enc.layout(&LayoutConfig::default().scale(0)).unwrap();
        let negative = enc.layout(&LayoutConfig::default().scale(-3)).unwrap();
        assert_eq!(zero.canvas.width, negative.canvas.width);
        assert_eq!(zero.canvas.width, 2 * 67 + 8);
        assert_eq!(zero.scale, 2);
        assert_eq!(zero, negative);
    }

    #[test]
    fn fractional_height_floors_bars() {
        let p = plan("1", &LayoutConfig::default().scale(2).module_height(30.7));
        // total 61.4: data bottom floor(41.4) = 41, guard bottom floor(57.4) = 57
        assert_eq!(p.canvas.height, 61);
        let data = p.bars.iter().find(|b| b.kind == ModuleKind::Data).unwrap();
        assert_eq!(data.rect.height, 41 - 4 + 1);
        let guard = p.guard_bars().next().unwrap();
        assert_eq!(guard.rect.height, 57 - 4 + 1);
    }

    #[test]
    fn bars_stay_inside_canvas() {
        for height in [0.5f32, 1.0, 3.0, 10.0, 12.0, 30.0, 100.0] {
            for scale in [-1, 1, 2, 5] {
                let config = LayoutConfig::default().scale(scale).module_height(height);
                let p = plan("7654321", &config);
                for bar in &p.bars {
                    assert!(bar.rect.right() <= p.canvas.width, "{height} {scale}");
                    assert!(bar.rect.bottom() <= p.canvas.height, "{height} {scale}");
                }
            }
        }
    }

    #[test]
    fn short_symbol_has_empty_bars() {
        let p = plan("1", &LayoutConfig::default().scale(2).module_height(1.0));
        assert_eq!(p.canvas.height, 2);
        assert!(p.bars.iter().all(|b| b.rect.height == 0));
    }

    #[test]
    fn invalid_module_height() {
        let enc = Ean8.encode("1").unwrap();
        for h in [0.0, -1.0] {
            let err = enc.layout(&LayoutConfig::default().module_height(h)).unwrap_err();
            assert_eq!(err.config_error(), Some(ConfigError::NonPositiveModuleHeight));
        }
    }

    #[test]
    fn clip_to_bounds() {
        let b = Size::new(10, 10);
        assert_eq!(Rect::new(8, 8, 5, 5).clip_to(b), Rect::new(8, 8, 2, 2));
        assert_eq!(Rect::new(12, 3, 5, 5).clip_to(b), Rect::new(10, 3, 0, 5));
        assert_eq!(Rect::new(1, 1, 2, 2).clip_to(b), Rect::new(1, 1, 2, 2));
    }
}
