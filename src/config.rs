//! Layout configuration: scale, module height, colors and font.
//!
//! # Example
//!
//! ```
//! use zenbarcode::{CanvasColor, FontStyle, LayoutConfig};
//!
//! let config = LayoutConfig::default()
//!     .scale(3)
//!     .module_height(40.0)
//!     .foreground(CanvasColor::srgb(0x20, 0x20, 0x20))
//!     .font("DejaVu Sans", FontStyle::Bold);
//!
//! assert_eq!(config.effective_scale(), 3);
//! assert!(config.validate().is_ok());
//! ```

use alloc::string::String;

use crate::error::ConfigError;

/// Fill color for bars, text and background.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanvasColor {
    /// Transparent black `[0, 0, 0, 0]`.
    #[default]
    Transparent,
    /// sRGB color with alpha (8-bit per channel).
    Srgb { r: u8, g: u8, b: u8, a: u8 },
}

impl CanvasColor {
    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::srgb(255, 255, 255)
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::srgb(0, 0, 0)
    }

    /// Opaque sRGB color.
    pub const fn srgb(r: u8, g: u8, b: u8) -> Self {
        Self::Srgb { r, g, b, a: 255 }
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Transparent => [0, 0, 0, 0],
            Self::Srgb { r, g, b, a } => [r, g, b, a],
        }
    }
}

/// Font weight/slant requested for the human-readable digits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Whether the style is bold.
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Whether the style is italic.
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Font descriptor. Resolution to an actual face is the renderer's job.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Family name, e.g. `"Arial"`.
    pub family: String,
    /// Weight/slant.
    pub style: FontStyle,
}

impl FontSpec {
    /// Create a font descriptor.
    pub fn new(family: impl Into<String>, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            style,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", FontStyle::Regular)
    }
}

/// Styling and sizing input to [`layout()`](crate::layout).
///
/// Read-only to the layout planner. Canvas dimensions are derived from it,
/// never stored in it.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Pixels per module. Values below 1 resolve to 2.
    pub scale: i32,
    /// Symbol height in modules (before scaling). Must be positive.
    pub module_height: f32,
    /// Bar and text color.
    pub foreground: CanvasColor,
    /// Canvas fill color.
    pub background: CanvasColor,
    /// Font for the human-readable digits.
    pub font: FontSpec,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: 5,
            module_height: 30.0,
            foreground: CanvasColor::black(),
            background: CanvasColor::white(),
            font: FontSpec::default(),
        }
    }
}

impl LayoutConfig {
    /// Set the pixel scale.
    pub fn scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the module height.
    pub fn module_height(mut self, height: f32) -> Self {
        self.module_height = height;
        self
    }

    /// Set the bar and text color.
    pub fn foreground(mut self, color: CanvasColor) -> Self {
        self.foreground = color;
        self
    }

    /// Set the canvas fill color.
    pub fn background(mut self, color: CanvasColor) -> Self {
        self.background = color;
        self
    }

    /// Set the font.
    pub fn font(mut self, family: impl Into<String>, style: FontStyle) -> Self {
        self.font = FontSpec::new(family, style);
        self
    }

    /// Scale actually used for layout: `2` when the configured scale is below 1.
    pub fn effective_scale(&self) -> u32 {
        if self.scale < 1 { 2 } else { self.scale as u32 }
    }

    /// Check the config can be laid out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written as a negated comparison so NaN is rejected too.
        if !(self.module_height > 0.0) {
            return Err(ConfigError::NonPositiveModuleHeight);
        }
        if self.font.family.trim().is_empty() {
            return Err(ConfigError::EmptyFontFamily);
        }
        Ok(())
    }
}
